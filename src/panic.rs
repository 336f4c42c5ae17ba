use std::any::Any;
use std::panic::{UnwindSafe, catch_unwind};

/// Runs `f`, turning a panic into a logged `Err(())`.
///
/// Host callbacks run on the message loop, so one bad callback must not take the loop down.
pub fn handle_unwind<T>(what: &str, f: impl FnOnce() -> T + UnwindSafe) -> Result<T, ()> {
    // Dropping the panic payload can itself panic, hence the outer catch.
    catch_unwind(|| match catch_unwind(f) {
        Ok(x) => Ok(x),
        Err(e) => {
            log::error!("Caught panic in {what}: {}", payload_message(&*e));
            Err(())
        }
    })
    .unwrap_or_else(|_| Err(()))
}

fn payload_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "<non-string payload>"
    }
}
