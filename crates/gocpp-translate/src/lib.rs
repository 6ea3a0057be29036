//! Line-oriented translation of a Go subset into C++17.
//!
//! `gocpp-translate` is the engine behind the `gocpp` command. It walks the
//! input one line at a time, classifies each line by its leading tokens and
//! hands it to a construct transformer. There is no syntax tree: the only
//! state carried between lines lives in a [`TranslationContext`].
//!
//! # Architecture
//!
//! ```text
//!  Go source        pipeline.rs             postprocess/          C++17 unit
//! ───────────    ─────────────────────    ─────────────────    ────────────
//!  line by   ──> classify ─> transform ──> helper definitions ──> #includes
//!  line          (context.rs) (transform/)  (helpers.rs)          + body
//! ```
//!
//! # Example
//!
//! ```
//! let cpp = gocpp_translate::translate("func main() {\n\tfmt.Println(\"hi\")\n}\n").unwrap();
//! assert!(cpp.contains("std::cout << \"hi\" << std::endl;"));
//! assert!(cpp.starts_with("#include <iostream>"));
//! ```
//!
//! # Supported subset
//!
//! Functions (no receivers), `if`/`for`/`switch`, `var`/`const`/`type`
//! declarations including struct types and `iota` blocks, slices, arrays,
//! maps, multiple return values, and the `fmt` print family. Anything else
//! is reported as a [`TranslateError`] naming the line.

pub mod context;
pub mod error;
pub mod extract;
pub mod pipeline;
pub mod postprocess;
pub mod transform;
pub mod types;

pub use context::{BlockKind, SymbolFacts, TranslationContext};
pub use error::{ConstructError, TranslateError, TranslateErrorKind};
pub use pipeline::Translator;
pub use transform::{Advice, ConstructResult, Terminator};
pub use types::map_type;

/// Translates one Go unit into a complete C++17 translation unit.
pub fn translate(source: &str) -> Result<String, TranslateError> {
    Translator::new().translate(source)
}
