use mgate_derive::gateway_error;
use std::borrow::Cow;

#[gateway_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err::<(), _>(std::io::Error::other("disk unplugged")).context("Reading payload")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (Reading payload): disk unplugged");

    let internal: DemoError = "boom".into();
    assert_eq!(internal.to_string(), "Internal error: boom");

    let owned: Result<(), DemoError> = Err(DemoError::from(String::from("late")));
    let err = owned.context("Late failure").unwrap_err();
    assert_eq!(err.to_string(), "Internal error (Late failure): late");
}
