//! Measurement script synthesis.
//!
//! | Module     | Purpose                                        |
//! |------------|------------------------------------------------|
//! | `fragment` | One builder per concern (wrapper, size, ...)   |
//! | `compose`  | Fragment ordering and final rendering          |
//! | `escape`   | Single-quoted literal escaping                 |

mod compose;
mod escape;
pub mod fragment;

pub use compose::{Script, compose};
pub use escape::single_quoted;
pub use fragment::{Fragment, FragmentKind};
