//! Template resolution and rendering.
//!
//! A dotenver template is a `.env` file whose declarations may carry a
//! generator directive:
//!
//! ```text
//! # Database
//! DB_HOST=localhost
//! DB_PASSWORD= ## dotenver:password:db(length=24, special_chars=false)
//! DEBUG= ## dotenver:boolean(chance_of_getting_true=100)
//! ```
//!
//! # Processing
//!
//! 1. [`matcher`] splits each line into left side, variable, literal value
//!    and directive.
//! 2. [`merge`] reconciles the template with the existing `.env`: existing
//!    assignments win, directives become deferred calls and variables that
//!    only exist in the `.env` are appended after a separator block.
//! 3. [`renderer`] runs the merge for a whole batch first, then expands the
//!    deferred calls with `tera`, sharing named values through one
//!    [`NamedValueCache`].
//!
//! # Directive arguments
//!
//! Argument text is compiled as `tera` keyword arguments, so strings are
//! quoted and booleans are `true`/`false`. Besides the generator's own
//! arguments, every directive accepts:
//!
//! - `quotes` - `'` or `"`, wraps the value and escapes embedded quotes
//! - `escape_with` - escape prefix used with `quotes`, `\` by default
//! - `name` - same as the `:name` suffix
//!
//! Only directive calls are ever handed to `tera`; the rest of the template
//! is copied verbatim, so literal `{{` in values needs no escaping.

pub mod cache;
pub mod error;
pub mod functions;
pub mod matcher;
pub mod merge;
pub mod renderer;

pub use cache::{NamedValueCache, NamedValueKey};
pub use error::{DirectiveLocation, Phase, TemplateError};
pub use functions::DotenverFunction;
pub use matcher::{Declaration, Directive, LineMatcher};
pub use merge::{DeferredCall, IntermediateTemplate, LEFTOVER_HEADER, MergeResult, Segment, merge};
pub use renderer::{BatchRenderer, RenderedTemplate, TemplateSource};
