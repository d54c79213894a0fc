use genu_derive::genu_error;
use std::borrow::Cow;

#[genu_error]
pub enum ParseError {
    #[error("Bad number{}: {source}", format_context(.context))]
    Number { source: std::num::ParseIntError, context: Option<Cow<'static, str>> },

    #[error("Out of range{}: {message}", format_context(.context))]
    Range { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn parse(raw: &str) -> Result<u8, ParseError> {
    let value: u32 = raw.parse::<u32>().context("Parsing port offset")?;
    u8::try_from(value).map_err(|_| ParseError::Range {
        message: format!("{value} does not fit in u8").into(),
        context: None,
    })
}

fn main() {
    let err = parse("x").unwrap_err();
    assert_eq!(err.context_message(), Some("Parsing port offset"));
    assert!(err.to_string().starts_with("Bad number (Parsing port offset)"));

    let err = parse("300").context("Loading limits").unwrap_err();
    assert_eq!(err.kind(), "Range");
    assert_eq!(err.context_message(), Some("Loading limits"));
}
