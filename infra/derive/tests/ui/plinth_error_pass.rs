use plinth_derive::plinth_error;
use std::borrow::Cow;

#[plinth_error]
pub enum DemoError {
    #[code("DEMO_IO_ERROR")]
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {}
