use genu_derive::genu_error;
use std::borrow::Cow;

#[genu_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Conflict{}: {message}", format_context(.context))]
    Conflict { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    std::fs::read("/genu/definitely/missing/file")?;
    Ok(())
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.kind(), "Io");
    assert!(err.context_message().is_none());

    let internal: DemoError = "boom".into();
    assert_eq!(internal.kind(), "Internal");
    assert_eq!(internal.to_string(), "Internal error: boom");
}
