//! Local file storage adapters.

mod page_archive;

pub use page_archive::FsPageArchive;
