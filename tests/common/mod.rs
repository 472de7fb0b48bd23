use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use treelox::interpreter::Interpreter;
use treelox::runner::{self, RunError};

/// A `Write` sink whose contents stay readable after the interpreter that
/// owns one handle has taken it.
#[derive(Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Interpreter wired to a fresh buffer.
pub fn interpreter() -> (Interpreter, SharedBuffer) {
    let buffer = SharedBuffer::default();
    let interpreter = Interpreter::with_output(Box::new(buffer.clone()));

    (interpreter, buffer)
}

/// Runs `source` on a fresh interpreter; returns what it printed and how the
/// run ended.
pub fn run(source: &str) -> (String, Result<(), RunError>) {
    let (mut interpreter, buffer) = interpreter();
    let result = runner::run(&mut interpreter, source);

    (buffer.contents(), result)
}

/// Runs `source`, which must succeed, and returns the printed lines.
#[allow(dead_code)]
pub fn run_ok(source: &str) -> Vec<String> {
    let (output, result) = run(source);

    if let Err(e) = result {
        panic!("run failed: {}\noutput so far:\n{}", e, output);
    }

    output.lines().map(str::to_string).collect()
}

/// Runs `source`, which must fail, and returns the printed lines and the
/// error message.
#[allow(dead_code)]
pub fn run_err(source: &str) -> (Vec<String>, String) {
    let (output, result) = run(source);

    let Err(e) = result else {
        panic!("run unexpectedly succeeded; output:\n{}", output);
    };

    (output.lines().map(str::to_string).collect(), e.to_string())
}
