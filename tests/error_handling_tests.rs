use std::error::Error;
use ttydbg::domain::error::{EXIT_RUNTIME, EXIT_SUCCESS, EXIT_USAGE};
use ttydbg::{TtyDbgError, TtyDbgResult};

/// Error handling tests
#[cfg(test)]
mod error_handling_tests {
    use super::*;

    fn serial_error() -> serialport::Error {
        serialport::Error::new(serialport::ErrorKind::NoDevice, "no such device")
    }

    #[test]
    fn test_error_messages_name_the_operation() {
        let cases = vec![
            (
                TtyDbgError::DeviceOpen {
                    path: "/dev/ttyUSB0".to_string(),
                    source: serial_error(),
                },
                "open failed",
            ),
            (TtyDbgError::NoTarget, "no target specified"),
            (
                TtyDbgError::Configuration {
                    path: "/dev/ttyUSB0".to_string(),
                    source: serial_error(),
                },
                "line configuration failed",
            ),
            (
                TtyDbgError::TaskStart {
                    message: "no runtime".to_string(),
                },
                "reader task failed to start",
            ),
            (
                TtyDbgError::Transmit(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone")),
                "write failed",
            ),
            (
                TtyDbgError::Receive(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone")),
                "read failed",
            ),
            (
                TtyDbgError::Console(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "gone")),
                "console write failed",
            ),
            (TtyDbgError::Encoding("'g'".to_string()), "illegal input"),
            (TtyDbgError::InvalidCount { count: i64::MAX }, "illegal count"),
            (
                TtyDbgError::SignalSubscription(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "denied",
                )),
                "signal subscription failed",
            ),
            (TtyDbgError::Unknown("odd".to_string()), "unknown error"),
        ];

        for (error, expected) in cases {
            let display = error.to_string();
            assert!(display.contains(expected), "{display:?} lacks {expected:?}");
            assert!(!display.contains('\n'), "diagnostic must be one line");
            assert_eq!(error.exit_code(), EXIT_RUNTIME);
        }
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_ne!(EXIT_SUCCESS, EXIT_USAGE);
        assert_ne!(EXIT_USAGE, EXIT_RUNTIME);
        assert_ne!(EXIT_SUCCESS, EXIT_RUNTIME);
    }

    #[test]
    fn test_error_chain() {
        let error = TtyDbgError::DeviceOpen {
            path: "/dev/ttyUSB0".to_string(),
            source: serial_error(),
        };

        let source = error.source().expect("open error keeps its cause");
        assert!(source.to_string().contains("no such device"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TtyDbgError>();
    }

    #[tokio::test]
    async fn test_async_error_propagation() {
        async fn failing() -> TtyDbgResult<()> {
            Err(TtyDbgError::InvalidCount { count: -5_000_000_000 })
        }

        async fn calling() -> TtyDbgResult<()> {
            failing().await?;
            Ok(())
        }

        let error = calling().await.unwrap_err();
        assert!(error.to_string().contains("-5000000000"));
    }

    #[tokio::test]
    async fn test_join_error_conversion() {
        let handle = tokio::spawn(async { panic!("reader blew up") });
        let join_error = handle.await.unwrap_err();

        let error: TtyDbgError = join_error.into();
        assert!(matches!(error, TtyDbgError::Join(_)));
        assert!(error.to_string().contains("join failed"));
    }

    #[test]
    fn test_error_size() {
        let error_size = std::mem::size_of::<TtyDbgError>();
        assert!(error_size <= 128, "TtyDbgError too large: {} bytes", error_size);
    }

    #[test]
    fn test_result_ok_path() {
        fn ok() -> TtyDbgResult<u64> {
            Ok(2)
        }
        tokio_test::assert_ok!(ok());
        tokio_test::assert_err!(Err::<(), _>(TtyDbgError::NoTarget));
    }
}
