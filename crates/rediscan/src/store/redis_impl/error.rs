//! Redis error mapping to StoreError.

use rediscan_core::store::StoreError;

/// Maps Redis errors to StoreError.
pub fn map_redis_error(err: redis::RedisError) -> StoreError {
    if err.is_connection_refusal() || err.is_timeout() || err.is_connection_dropped() {
        StoreError::ConnectionFailed(err.to_string())
    } else if err.kind() == redis::ErrorKind::TypeError {
        StoreError::UnexpectedReply(err.to_string())
    } else {
        StoreError::CommandFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_error_maps_to_unexpected_reply() {
        let err = redis::RedisError::from((redis::ErrorKind::TypeError, "expected string"));
        assert!(matches!(map_redis_error(err), StoreError::UnexpectedReply(_)));
    }

    #[test]
    fn test_response_error_maps_to_command_failed() {
        let err = redis::RedisError::from((redis::ErrorKind::ResponseError, "WRONGTYPE"));
        assert!(matches!(map_redis_error(err), StoreError::CommandFailed(_)));
    }

    #[test]
    fn test_io_error_maps_to_connection_failed() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        let err = redis::RedisError::from(io);
        assert!(matches!(
            map_redis_error(err),
            StoreError::ConnectionFailed(_)
        ));
    }
}
