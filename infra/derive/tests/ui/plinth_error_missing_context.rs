use plinth_derive::plinth_error;

#[plinth_error]
pub enum DemoError {
    #[error("io failure: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
}

fn main() {}
