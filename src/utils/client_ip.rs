use actix_web::HttpRequest;

/// Client IP as actix resolves it: `Forwarded`, then `X-Forwarded-For`, then the peer address
pub fn client_ip(req: &HttpRequest) -> Option<String> {
    req.connection_info()
        .realip_remote_addr()
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
        .map(String::from)
}
