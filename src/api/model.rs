use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use std::fmt;
use std::net::IpAddr;

/// Query parameters understood by `/nic/update`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct UpdateParams {
    pub hostname: Option<String>,
    pub myip: Option<String>,
    /// Only its presence matters.
    pub offline: Option<String>,
}

impl UpdateParams {
    /// The address to publish: `myip` when given, otherwise the address the request came from.
    pub fn candidate_address(&self, observed: IpAddr) -> String {
        match self.myip.as_deref() {
            Some(myip) if !myip.is_empty() => myip.to_string(),
            _ => match observed {
                IpAddr::V6(v6) => v6
                    .to_ipv4_mapped()
                    .map_or_else(|| v6.to_string(), |v4| v4.to_string()),
                IpAddr::V4(v4) => v4.to_string(),
            },
        }
    }
}

/// The plaintext return codes of the DynDNS update API that router firmware understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    BadAuth,
    BadAgent,
    NotSupported,
    NoHost,
    GeneralError,
    NoChange(String),
    Good(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::BadAuth => f.write_str("badauth"),
            Token::BadAgent => f.write_str("badagent"),
            Token::NotSupported => f.write_str("!donator"),
            Token::NoHost => f.write_str("nohost"),
            Token::GeneralError => f.write_str("911"),
            Token::NoChange(address) => write!(f, "nochg {address}"),
            Token::Good(address) => write!(f, "good {address}"),
        }
    }
}

// The line terminator and content type are added by the framing layer.
impl IntoResponse for Token {
    fn into_response(self) -> Response {
        (StatusCode::OK, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{Ipv4Addr, Ipv6Addr};

    #[test]
    fn tokens_render_as_dyndns_return_codes() {
        assert_eq!(Token::BadAuth.to_string(), "badauth");
        assert_eq!(Token::BadAgent.to_string(), "badagent");
        assert_eq!(Token::NotSupported.to_string(), "!donator");
        assert_eq!(Token::NoHost.to_string(), "nohost");
        assert_eq!(Token::GeneralError.to_string(), "911");
        assert_eq!(
            Token::NoChange("10.1.10.1".to_string()).to_string(),
            "nochg 10.1.10.1"
        );
        assert_eq!(
            Token::Good("192.168.1.1".to_string()).to_string(),
            "good 192.168.1.1"
        );
    }

    #[test]
    fn explicit_myip_wins() {
        let params = UpdateParams {
            myip: Some("192.168.1.1".to_string()),
            ..UpdateParams::default()
        };
        let observed = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7));
        assert_eq!(params.candidate_address(observed), "192.168.1.1");
    }

    #[test]
    fn falls_back_to_peer_address() {
        let params = UpdateParams {
            myip: Some(String::new()),
            ..UpdateParams::default()
        };
        let observed = IpAddr::V4(Ipv4Addr::new(203, 0, 113, 7));
        assert_eq!(params.candidate_address(observed), "203.0.113.7");

        let mapped = IpAddr::V6(Ipv4Addr::new(203, 0, 113, 7).to_ipv6_mapped());
        assert_eq!(
            UpdateParams::default().candidate_address(mapped),
            "203.0.113.7"
        );

        let v6 = IpAddr::V6(Ipv6Addr::LOCALHOST);
        assert_eq!(UpdateParams::default().candidate_address(v6), "::1");
    }
}
