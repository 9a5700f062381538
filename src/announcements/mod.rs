//! Localized announcements backed by a Supabase table
pub mod client;
pub mod types;

pub use client::{AnnouncementStore, SupabaseStore};
pub use types::{Announcement, AnnouncementRaw, Category, Language};
