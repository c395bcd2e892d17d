//! Property-based tests for parsing, quoting and generation logic.
//!
//! Uses `proptest` to verify invariants across many random inputs.

#![allow(clippy::expect_used)]

use proptest::prelude::*;

use kaggle_ssh::domain::Intent;
use kaggle_ssh::domain::remote::{encode_batch, validate_device_id, validate_pubkey};
use kaggle_ssh::domain::secret::{SECRET_LEN, generate_secret};
use kaggle_ssh::domain::tunnel::{find_tunnel_token, parse_endpoint};
use kaggle_ssh::domain::ui::UiTarget;

proptest! {
    /// Any console output ending in an ngrok address yields that address.
    #[test]
    fn prop_endpoint_scraped_from_noise(
        noise in "[a-zA-Z>()' ]{0,40}",
        shard in 0u8..10,
        port in 1u16..,
    ) {
        let body = format!("{noise}\ntcp://{shard}.tcp.eu.ngrok.io:{port}\n");
        let token = find_tunnel_token(&body).expect("token present");
        let endpoint = parse_endpoint(token).expect("parses");
        prop_assert_eq!(endpoint.host, format!("{shard}.tcp.eu.ngrok.io"));
        prop_assert_eq!(endpoint.port, port);
    }

    /// Ports beyond u16 are rejected, never truncated.
    #[test]
    fn prop_oversized_port_rejected(port in 65_536u32..10_000_000) {
        let token = format!("0.tcp.eu.ngrok.io:{port}");
        prop_assert!(parse_endpoint(&token).is_err());
    }

    /// Encoded batches are a single line free of the script's quotes.
    #[test]
    fn prop_batch_is_single_quoted_line(script in "[ -~\n\t]{0,200}") {
        let command = encode_batch(&script);
        prop_assert!(!command.contains('\n'));
        prop_assert_eq!(command.matches('\'').count(), 2);
    }

    /// Keys with shell metacharacters never validate.
    #[test]
    fn prop_pubkey_rejects_shell_metacharacters(
        body in "[A-Za-z0-9+/]{20,60}",
        meta in prop::sample::select(vec!['\'', ';', '`', '$', '|', '&', '\n', '"']),
    ) {
        let key = format!("ssh-ed25519 {body}{meta}x user@host");
        prop_assert!(validate_pubkey(&key).is_err());
    }

    /// Device ids of the wrong shape never validate.
    #[test]
    fn prop_device_id_needs_eight_groups(groups in 1usize..12) {
        let id = vec!["ABCDEF2"; groups].join("-");
        prop_assert_eq!(validate_device_id(&id).is_ok(), groups == 8);
    }

    /// Menu numbers outside 1..=5 are rejected.
    #[test]
    fn prop_menu_range(choice in any::<u8>()) {
        prop_assert_eq!(Intent::from_choice(choice).is_ok(), (1..=5).contains(&choice));
    }

    /// Text selectors embed the text as a JSON string, whatever it contains.
    #[test]
    fn prop_text_selector_quotes_json(text in ".{0,40}") {
        let selector = UiTarget::exact_text(&text).selector();
        let quoted = selector
            .strip_prefix("internal:text=")
            .and_then(|s| s.strip_suffix('s'))
            .expect("shape");
        let parsed: String = serde_json::from_str(quoted).expect("valid JSON string");
        prop_assert_eq!(parsed, text);
    }
}

#[test]
fn secrets_are_long_alphanumeric_and_distinct() {
    let secrets: std::collections::HashSet<_> = (0..50).map(|_| generate_secret()).collect();
    assert_eq!(secrets.len(), 50, "duplicate secrets generated");
    for secret in &secrets {
        assert_eq!(secret.len(), SECRET_LEN);
        assert!(secret.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
