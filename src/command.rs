#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Exit,
}
