use std::cell::RefCell;
use std::rc::Rc;

use pipesim_core::common::SyscallError;
use pipesim_core::core::arch::{SyscallHandler, SyscallOutcome, SyscallRequest};

/// One serviced call: the syscall number, the address it came from and its first argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Call {
    pub number: u32,
    pub pc: u32,
    pub arg0: Option<u32>,
}

/// Syscall handler that records every request and answers from a script.
///
/// The handler moves into the simulator; keep a clone of [`RecordingSyscalls::calls`]
/// to inspect what it saw.
#[derive(Clone, Debug, Default)]
pub struct RecordingSyscalls {
    pub calls: Rc<RefCell<Vec<Call>>>,
    /// Syscall number that ends the run with its first argument as exit code.
    exit_number: Option<u32>,
    /// Value returned to the program for every other call.
    result: Option<u32>,
}

impl RecordingSyscalls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn exit_on(mut self, number: u32) -> Self {
        self.exit_number = Some(number);
        self
    }

    pub fn returning(mut self, result: u32) -> Self {
        self.result = Some(result);
        self
    }
}

impl SyscallHandler for RecordingSyscalls {
    fn do_syscall(&mut self, request: &mut SyscallRequest<'_>) -> Result<SyscallOutcome, SyscallError> {
        let arg0 = request.arg(0).ok();
        self.calls.borrow_mut().push(Call {
            number: request.number,
            pc: request.pc,
            arg0,
        });
        if Some(request.number) == self.exit_number {
            return Ok(SyscallOutcome {
                result: None,
                exit: Some(arg0.unwrap_or(0)),
            });
        }
        Ok(SyscallOutcome {
            result: self.result,
            exit: None,
        })
    }
}
