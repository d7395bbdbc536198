use geocoder_core::gateways::geocode::GatewayError;
use reqwest::{blocking::Client, header::USER_AGENT};
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Upper bound for a single request including the response body.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

pub(crate) fn client() -> Result<Client, GatewayError> {
    Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(transport)
}

/// The `User-Agent` is set for each request because
/// it can be reconfigured while the client is alive.
pub(crate) fn get_json<T>(
    client: &Client,
    url: &str,
    params: &[(&str, &str)],
    user_agent: &str,
) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    let response = client
        .get(url)
        .header(USER_AGENT, user_agent)
        .query(params)
        .send()
        .map_err(transport)?;
    let status = response.status();
    if !status.is_success() {
        return Err(GatewayError::Status(status.as_u16()));
    }
    let body = response.text().map_err(transport)?;
    parse_json(&body)
}

pub(crate) fn parse_json<T>(body: &str) -> Result<T, GatewayError>
where
    T: DeserializeOwned,
{
    serde_json::from_str(body).map_err(|err| GatewayError::MalformedResponse(err.to_string()))
}

fn transport(err: reqwest::Error) -> GatewayError {
    GatewayError::Transport(Box::new(err))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::{
        io::{BufRead, BufReader, Write},
        net::TcpListener,
        sync::mpsc,
        thread,
    };

    /// Serves one canned response for each entry of `responses`
    /// and returns the `User-Agent` headers of the received requests.
    pub fn serve(responses: Vec<(u16, &'static str)>) -> (String, mpsc::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/search", listener.local_addr().unwrap());
        let (tx, rx) = mpsc::channel();
        thread::spawn(move || {
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut user_agent = String::new();
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    let line = line.trim_end();
                    if line.is_empty() {
                        break;
                    }
                    if let Some((name, value)) = line.split_once(':') {
                        if name.eq_ignore_ascii_case("user-agent") {
                            user_agent = value.trim().to_owned();
                        }
                    }
                }
                write!(
                    stream,
                    "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    body.len()
                )
                .unwrap();
                stream.flush().unwrap();
                tx.send(user_agent).unwrap();
            }
        });
        (url, rx)
    }

    #[test]
    fn reject_non_json_body() {
        let res: Result<serde_json::Value, _> = parse_json("<html>Bad Gateway</html>");
        assert!(matches!(res, Err(GatewayError::MalformedResponse(_))));
    }

    #[test]
    fn build_client() {
        assert!(client().is_ok());
    }

    #[test]
    fn unsuccessful_status() {
        let (url, _rx) = serve(vec![(503, r#"{"error":"overloaded"}"#)]);
        let res: Result<serde_json::Value, _> =
            get_json(&client().unwrap(), &url, &[("q", "Almere")], "geocoder-test/0.0");
        assert!(matches!(res, Err(GatewayError::Status(503))));
    }

    #[test]
    fn send_user_agent_of_each_request() {
        let (url, rx) = serve(vec![(200, "[]"), (200, "[]")]);
        let client = client().unwrap();
        let _: Vec<serde_json::Value> = get_json(&client, &url, &[], "first/1").unwrap();
        let _: Vec<serde_json::Value> = get_json(&client, &url, &[], "second/2").unwrap();
        assert_eq!("first/1", rx.recv().unwrap());
        assert_eq!("second/2", rx.recv().unwrap());
    }
}
