use mockall::mock;

use pipesim_core::common::ExecuteError;
use pipesim_core::core::arch::{TrapHandler, TrapId};

mock! {
    /// DLX trap service mock.
    pub Traps {}

    impl TrapHandler for Traps {
        fn trap(&mut self, id: TrapId, arg: u32) -> Result<u32, ExecuteError>;
    }
}
