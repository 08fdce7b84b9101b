//! Canonical data types shared across every bloodgate stage crate.
//!
//! Every record here is a tagged struct with enumerated fields: there is no
//! loose-dict or `serde_json::Value` passed between stages. A stage that
//! wants to change what it emits changes a field on a type here, not a key
//! in a map somewhere downstream.

pub mod audit;
pub mod catalog;
pub mod constraint;
pub mod context;
pub mod error;
pub mod gate;
pub mod intent;
pub mod marker;
pub mod protocol;
pub mod request;

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::ProductLine;
    use intent::{Sex, UserContext};

    #[test]
    fn user_context_defaults_product_line_from_sex() {
        let ctx = UserContext::new(Sex::Male, None);
        assert_eq!(ctx.product_line, ProductLine::Male);

        let ctx = UserContext::new(Sex::Female, None);
        assert_eq!(ctx.product_line, ProductLine::Female);
    }

    #[test]
    fn user_context_respects_explicit_product_line() {
        let ctx = UserContext::new(Sex::Male, Some(ProductLine::Female));
        assert_eq!(ctx.product_line, ProductLine::Female);
    }
}
