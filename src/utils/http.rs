//! Request metadata used in audit records.

use actix_web::HttpRequest;

/// Proxy headers checked, in order, for the originating client address.
const FORWARDED_IP_HEADERS: [&str; 3] = ["X-Forwarded-For", "X-Real-IP", "CF-Connecting-IP"];

/// Best-effort client IP for logging.
///
/// Takes the first hop of the first populated proxy header, otherwise the
/// peer address. Never used for any verification decision.
pub fn extract_client_ip(req: &HttpRequest) -> String {
    for header_name in FORWARDED_IP_HEADERS {
        if let Some(value) = req.headers().get(header_name)
            && let Ok(value) = value.to_str()
        {
            // X-Forwarded-For can contain multiple IPs, take the first one
            let ip = value.split(',').next().unwrap_or(value).trim();
            if !ip.is_empty() {
                return ip.to_string();
            }
        }
    }

    req.connection_info()
        .peer_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// Extract user agent from request headers
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn first_forwarded_hop_wins() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .insert_header(("X-Real-IP", "10.0.0.2"))
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "203.0.113.7");
    }

    #[test]
    fn falls_back_to_peer_address() {
        let req = TestRequest::default()
            .peer_addr("192.0.2.10:4000".parse().unwrap())
            .to_http_request();
        assert_eq!(extract_client_ip(&req), "192.0.2.10");
    }

    #[test]
    fn user_agent_is_optional() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_user_agent(&req), None);

        let req = TestRequest::default()
            .insert_header(("User-Agent", "license-server/2.1"))
            .to_http_request();
        assert_eq!(extract_user_agent(&req).as_deref(), Some("license-server/2.1"));
    }
}
