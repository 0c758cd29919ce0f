use plinth_derive::plinth_error;

#[plinth_error]
pub enum DemoError {
    #[code("not_screaming")]
    #[error("boom")]
    Boom { message: String },
}

fn main() {}
