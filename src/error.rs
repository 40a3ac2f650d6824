use custom_error::custom_error;

pub type Result<T> = std::result::Result<T, Error>;

custom_error! {pub Error
    Io{source: std::io::Error} = "I/O error",
    NotYielded = "No item was yielded",
    Strict{count: usize} = "{count} malformed field(s) found in strict mode"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn strict_reports_count() {
        let err = Error::Strict { count: 3 };
        assert_eq!(err.to_string(), "3 malformed field(s) found in strict mode");
    }
}
