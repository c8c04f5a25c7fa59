use gw_core::ClassId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OwnerError {
    #[error("class {0} is not on the roster")]
    UnknownClass(ClassId),

    /// The domain's transfer-eligibility hook rejected the target.  Reaching
    /// this is a caller bug — the contract is to transfer only to approved
    /// classes — so treat it as a logic error, not a condition to branch on.
    #[error("class {0} is not eligible to receive grid ownership")]
    IneligibleTransfer(ClassId),
}

pub type OwnerResult<T> = Result<T, OwnerError>;
