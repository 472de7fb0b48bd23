//! Host functions installed in the global scope of every interpreter.

use std::cell::RefCell;
use std::fs;
use std::rc::Rc;

use chrono::Utc;
use log::{debug, info};

use crate::callable::{Callable, NativeFunction};
use crate::environment::Environment;
use crate::value::Value;

/// Defines `clock` and `fread` in `globals`.
pub fn install(globals: &Rc<RefCell<Environment>>) {
    let natives = [
        NativeFunction::new("clock", 0, clock),
        NativeFunction::new("fread", 1, fread),
    ];

    let mut globals = globals.borrow_mut();

    for native in natives {
        let name: String = native.name().to_string();

        debug!("Defining native function '{}'", name);

        globals.define(&name, Value::Callable(Rc::new(native)));
    }

    info!("Native functions installed");
}

/// Seconds since the Unix epoch, with sub‑second precision.
fn clock(_args: &[Value]) -> Result<Value, String> {
    let micros: i64 = Utc::now().timestamp_micros();

    Ok(Value::Number(micros as f64 / 1_000_000.0))
}

/// Whole contents of the file at the given path.
fn fread(args: &[Value]) -> Result<Value, String> {
    let Some(Value::String(path)) = args.first() else {
        return Err("First argument to fread must be a string.".to_string());
    };

    debug!("fread '{}'", path);

    fs::read_to_string(path)
        .map(Value::String)
        .map_err(|_| format!("Path: {} was not found or could not be opened.", path))
}
