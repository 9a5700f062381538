use clap::Parser;
use mcp_catalog::catalog::DescriptorValidator;
use mcp_catalog::cli::{self, Cli};
use mcp_catalog::config::ConfigValidator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    match Cli::parse() {
        Cli::Serve(args) => cli::serve::run(args).await?,
        Cli::List(args) => cli::list::run(args)?,
        Cli::Validate(args) => {
            if !cli::validate::run(args)? {
                std::process::exit(1);
            }
        }
        Cli::Schema(args) => {
            let schema = if args.config {
                ConfigValidator::new().export_schema()
            } else {
                DescriptorValidator::new().export_schema()
            };
            println!("{}", schema);
        }
    }

    Ok(())
}
