pub mod async_walker;
pub mod digest;
pub mod io;

pub use digest::{DigestRequest, Sha256Digester, attach_digest, sha256_file, sha256_text};
pub use io::{FsError, atomic_write_str, write_json_atomic};
