use courier_core::Record;
use std::io;

/// Port for the raw record feed
///
/// A single forward pass over a finite input. `Ok(None)` marks the end;
/// after that the source stays exhausted.
pub trait RecordSource {
    fn next_record(&mut self) -> io::Result<Option<Record>>;

    /// Short description for logging (path, stream name)
    fn describe(&self) -> String {
        "records".to_string()
    }
}

impl<S: RecordSource + ?Sized> RecordSource for Box<S> {
    fn next_record(&mut self) -> io::Result<Option<Record>> {
        (**self).next_record()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
