//! Configuration section definitions.
//!
//! Each module corresponds to a section in `quire.toml`:
//!
//! | Module      | TOML Section   | Purpose                                 |
//! |-------------|----------------|-----------------------------------------|
//! | `content`   | `[content]`    | Corpus directory and file naming        |
//! | `index`     | `[index]`      | Summary index output and defaults       |
//! | `read_time` | `[read_time]`  | Reading speed used for read estimates   |
//! | `code`      | `[code]`       | Code block component and highlighting   |
//! | `build`     | `[build]`      | Tree output directory                   |

mod build;
mod code;
mod content;
mod index;
mod read_time;

pub use build::BuildConfig;
pub use code::CodeConfig;
pub use content::ContentConfig;
pub use index::{DEFAULT_PLACEHOLDER_IMAGE, IndexConfig};
pub use read_time::ReadTimeConfig;
