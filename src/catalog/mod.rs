pub mod aggregator;
pub mod naming;
pub mod registry;
pub mod types;
pub mod validation;

pub use aggregator::CatalogAggregator;
pub use naming::normalize_name;
pub use registry::{ServiceEntry, ServiceRegistry};
pub use types::{
    CanonicalDescriptor, Configuration, ConfigurationTemplate, DescriptorMetadata,
    DescriptorStatus, HttpTemplate, InputDefinition, InputType, Maintainer, ServiceMeta, Source,
    SourceCounts, StdioTemplate, Transport,
};
pub use validation::{DescriptorValidator, FileReport};
