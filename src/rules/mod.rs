//! Built-in rule library.
//!
//! Every constructor here returns a [`RuleRef`](crate::RuleRef) conforming
//! solely to the [`Rule`](crate::Rule) contract; the engine neither knows
//! nor cares which of them a chain uses. The modules group the rules by
//! concern:
//!
//! - [`types`]: presence and shape checks (`required`, `is_string`, …)
//! - [`compare`]: numeric and size comparisons (`min`, `max_len`, `one_of`, …)
//! - [`format`]: regex-backed format checks (`email`, `url`, `pattern`, …)
//! - [`transform`]: normalizing filters that rewrite the threaded value
//!   (`trim`, `to_int`, …)
//! - [`compose`]: composition over other rules (`group`, `optional`,
//!   `when`, `combine`)
//!
//! # Example
//!
//! ```rust
//! use gauntlet::{check_value, rules};
//!
//! let chain = [rules::trim(), rules::required(), rules::email()];
//! let bag = check_value("  ada@example.com  ", &chain).unwrap();
//! assert!(bag.is_empty());
//! ```

pub mod compare;
pub mod compose;
pub mod format;
pub mod transform;
pub mod types;

pub use compare::{between, eq, len, max, max_len, min, min_len, not_in, one_of};
pub use compose::{combine, group, optional, when};
pub use format::{alpha, alpha_num, ascii, email, pattern, url};
pub use transform::{lowercase, to_int, trim, uppercase};
pub use types::{is_bool, is_float, is_int, is_list, is_map, is_string, not_null, required};

pub use crate::rule::bail;
