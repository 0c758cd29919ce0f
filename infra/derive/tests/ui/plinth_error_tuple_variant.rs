use plinth_derive::plinth_error;

#[plinth_error]
pub enum DemoError {
    Io(std::io::Error),
}

fn main() {}
