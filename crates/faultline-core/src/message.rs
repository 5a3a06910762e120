//! Default client-facing messages, one per registered code
//!
//! Messages are shipped in a single fixed locale (Simplified Chinese).

use crate::ErrorCode;

pub const MSG_SUCCESS: &str = "操作成功";
pub const MSG_BAD_REQUEST: &str = "参数错误，请校对!";
pub const MSG_UNAUTHORIZED: &str = "登录失效，请重新登录";
pub const MSG_FORBIDDEN: &str = "您没有访问权限";
pub const MSG_NOT_FOUND: &str = "没有找到资源";
pub const MSG_CONFLICT: &str = "修改发生冲突，请稍后再试";
pub const MSG_TOO_MANY_REQUESTS: &str = "请求太频繁啦，先休息一下吧";
pub const MSG_CLIENT_CLOSED: &str = "连接已断开";
pub const MSG_INTERNAL: &str = "服务器开小差啦,稍后再来试一试";
pub const MSG_NOT_IMPLEMENTED: &str = "暂未支持该功能";
pub const MSG_UNAVAILABLE: &str = "服务不可用，非常抱歉";
pub const MSG_TIMEOUT: &str = "服务器处理超时啦，请稍后再试";
/// Message for codes outside the enumeration
pub const MSG_UNKNOWN: &str = "未知错误";

/// Look up the default message for a code
///
/// Returns `None` for unregistered codes.
pub fn lookup(code: ErrorCode) -> Option<&'static str> {
    let message = match code {
        ErrorCode::SUCCESS => MSG_SUCCESS,
        ErrorCode::BAD_REQUEST => MSG_BAD_REQUEST,
        ErrorCode::UNAUTHORIZED => MSG_UNAUTHORIZED,
        ErrorCode::FORBIDDEN => MSG_FORBIDDEN,
        ErrorCode::NOT_FOUND => MSG_NOT_FOUND,
        ErrorCode::CONFLICT => MSG_CONFLICT,
        ErrorCode::TOO_MANY_REQUESTS => MSG_TOO_MANY_REQUESTS,
        ErrorCode::CLIENT_CLOSED => MSG_CLIENT_CLOSED,
        ErrorCode::INTERNAL => MSG_INTERNAL,
        ErrorCode::NOT_IMPLEMENTED => MSG_NOT_IMPLEMENTED,
        ErrorCode::UNAVAILABLE => MSG_UNAVAILABLE,
        ErrorCode::TIMEOUT => MSG_TIMEOUT,
        _ => return None,
    };

    Some(message)
}

/// Default message for a code, or [`MSG_UNKNOWN`] if it is unregistered
pub fn default_message(code: ErrorCode) -> &'static str {
    lookup(code).unwrap_or(MSG_UNKNOWN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_registered_code_has_a_message() {
        for code in ErrorCode::REGISTERED {
            assert!(lookup(code).is_some(), "missing message for {code}");
        }
    }

    #[test]
    fn conflict_has_its_own_message() {
        assert_eq!(default_message(ErrorCode::CONFLICT), MSG_CONFLICT);
    }

    #[test]
    fn unregistered_code_resolves_to_unknown() {
        assert_eq!(lookup(ErrorCode::new(9999)), None);
        assert_eq!(default_message(ErrorCode::new(9999)), MSG_UNKNOWN);
    }
}
