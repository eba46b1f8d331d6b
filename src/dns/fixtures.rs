//! Test fixtures: DNS messages, fake DoH endpoints and a stubbed MX lookup.

use crate::dns::doh::DNS_MESSAGE_MEDIA_TYPE;
use crate::dns::mx::{MockMxLookup, ResolverResult};
use trust_dns_resolver::proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use trust_dns_resolver::proto::rr::rdata::{CNAME, MX};
use trust_dns_resolver::proto::rr::{Name, RData, Record, RecordType};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fqdn(domain: &str) -> Name {
    let mut name = Name::from_ascii(domain).unwrap();
    name.set_fqdn(true);
    name
}

fn base_response(domain: &str, code: ResponseCode) -> Message {
    let mut message = Message::new();
    message
        .set_id(0)
        .set_message_type(MessageType::Response)
        .set_op_code(OpCode::Query)
        .set_recursion_desired(true)
        .set_recursion_available(true)
        .set_response_code(code);
    message.add_query(Query::query(fqdn(domain), RecordType::MX));
    message
}

fn add_mx_answers(message: &mut Message, owner: &str, exchanges: &[&str]) {
    for (i, exchange) in exchanges.iter().enumerate() {
        let preference = 10 * (i as u16 + 1);
        let rdata = RData::MX(MX::new(preference, fqdn(exchange)));
        message.add_answer(Record::from_rdata(fqdn(owner), 300, rdata));
    }
}

/// A response to an MX question with the given response code and exchanges.
pub fn mx_response(domain: &str, code: ResponseCode, exchanges: &[&str]) -> Message {
    let mut message = base_response(domain, code);
    add_mx_answers(&mut message, domain, exchanges);
    message
}

/// An MX response whose answer section starts with a CNAME to `alias`.
pub fn mx_response_with_cname(domain: &str, alias: &str, exchanges: &[&str]) -> Message {
    let mut message = base_response(domain, ResponseCode::NoError);
    let cname = RData::CNAME(CNAME(fqdn(alias)));
    message.add_answer(Record::from_rdata(fqdn(domain), 300, cname));
    add_mx_answers(&mut message, alias, exchanges);
    message
}

pub fn wire(message: &Message) -> Vec<u8> {
    message.to_vec().unwrap()
}

/// Starts a DoH endpoint answering every `/dns-query` GET with `body`.
pub async fn mock_doh_server(status: u16, body: Vec<u8>) -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .and(header("content-type", DNS_MESSAGE_MEDIA_TYPE))
        .respond_with(
            ResponseTemplate::new(status)
                .set_body_bytes(body)
                .insert_header("content-type", DNS_MESSAGE_MEDIA_TYPE),
        )
        .mount(&server)
        .await;

    server
}

/// The `/dns-query` endpoint of a mock server.
pub fn endpoint(server: &MockServer) -> String {
    format!("{}/dns-query", server.uri())
}

/// Lookup answering a few fixed domains; anything else is indeterminate.
///
/// `existing.com` has two MX records, `github.io` none, `gnail.com` and
/// `non-existend.com` do not exist.
pub fn stub_lookup() -> MockMxLookup {
    let mut lookup = MockMxLookup::new();
    lookup.expect_lookup_mx().returning(|domain| match domain {
        "existing.com" => ResolverResult::found(2),
        "github.io" => ResolverResult::found(0),
        "gnail.com" | "non-existend.com" => ResolverResult::not_found(),
        _ => ResolverResult::indeterminate(),
    });
    lookup
}
