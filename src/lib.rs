pub mod error;
pub mod header;
pub mod entry;
pub mod alias;
pub mod validate;
pub mod archive;
pub mod sniff;
pub mod index;
pub mod fsio;
pub mod unpack;
pub mod pack;

pub use error::{FormatError, IndexError, PakError, PakResult};
pub use header::PakHeader;
pub use entry::{Entry, Resource};
pub use alias::Alias;
pub use archive::PakArchive;
pub use index::{IndexDocument, IndexEntry, INDEX_FILE_NAME};
pub use unpack::{unpack, unpack_with_options, UnpackOptions};
pub use pack::{pack, pack_document};
