use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PnlError {
    #[error("{buffer} buffer holds {len} values but {n} were requested")]
    OutOfRange {
        buffer: &'static str,
        len: usize,
        n: usize,
    },

    #[error("requested length {0} is negative")]
    NegativeLength(i64),
}
