//! CSRF 令牌
//!
//! 后端把令牌放在 cookie 里，写请求需要通过请求头带回去。

/// 从 Cookie 头中取出指定 cookie 的值（已做百分号解码）
pub fn csrf_token_from_cookie_header(header: &str, name: &str) -> Option<String> {
    if name.is_empty() {
        return None;
    }
    header
        .split(';')
        .map(str::trim)
        .find_map(|cookie| {
            let (key, value) = cookie.split_once('=')?;
            (key == name).then_some(value)
        })
        .filter(|value| !value.is_empty())
        .map(|value| {
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}
