//! Account state access port.

use crate::domain::error::EmacrossError;
use crate::domain::position::Position;

pub trait AccountPort {
    /// Open positions, in the order the bookkeeping system reports them.
    fn fetch_positions(&self) -> Result<Vec<Position>, EmacrossError>;
}
