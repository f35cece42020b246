use btmesh_common::address::{Address, UnicastAddress};
use btmesh_common::opcode::Opcode;
use btmesh_common::{Aid, CompanyIdentifier, ModelIdentifier, ParseError};
use btmesh_models::foundation::configuration::app_key::CONFIG_APPKEY_STATUS;
use btmesh_models::foundation::configuration::model_publication::CONFIG_MODEL_PUBLICATION_STATUS;
use btmesh_models::foundation::configuration::{
    ConfigurationClient, ConfigurationStatus, InboundStatusMetadata, NodeContext,
};
use btmesh_models::{Message, Model, Status};

/// A node object as a provisioner would keep it, supplying the decode context.
struct ProvisionedNode {
    unicast_address: u16,
    aid: Option<u8>,
}

impl NodeContext for ProvisionedNode {
    fn src(&self) -> UnicastAddress {
        UnicastAddress::new(self.unicast_address).unwrap()
    }

    fn akf_aid(&self) -> Option<Aid> {
        self.aid.map(Aid::from)
    }
}

fn node() -> ProvisionedNode {
    ProvisionedNode {
        unicast_address: 0x0005,
        aid: None,
    }
}

fn publication_status(model_identifier: &[u8]) -> Vec<u8> {
    let mut parameters = vec![
        0x00, 0x05, 0x00, 0x00, 0xC0, 0x00, 0x10, 0x05, 0x00, 0x20, 0x00, 0x01,
    ];
    parameters.extend_from_slice(model_identifier);
    parameters
}

#[test]
fn test_appkey_status() {
    let decoded =
        ConfigurationClient::decode(CONFIG_APPKEY_STATUS, &node(), &[0x00, 0x01, 0x02, 0x03, 0x04])
            .unwrap()
            .unwrap();

    assert_eq!(decoded.src(), UnicastAddress::new(0x0005).unwrap());
    assert!(!decoded.akf());
    assert_eq!(decoded.status_code_name(), "Success");

    match decoded.message() {
        ConfigurationStatus::AppKey(status) => {
            assert_eq!(status.net_key_index().value(), 0x0201);
            assert_eq!(status.app_key_index().value(), 0x0040);
        }
        other => panic!("unexpected message {:?}", other),
    }
}

#[test]
fn test_appkey_status_truncated() {
    assert_eq!(
        ConfigurationClient::decode(CONFIG_APPKEY_STATUS, &node(), &[0x00, 0x01, 0x02]),
        Err(ParseError::TruncatedPdu)
    );
}

#[test]
fn test_model_publication_width_follows_length() {
    let sig = ConfigurationClient::decode(
        CONFIG_MODEL_PUBLICATION_STATUS,
        &node(),
        &publication_status(&[0x00, 0x13]),
    )
    .unwrap()
    .unwrap();

    let vendor = ConfigurationClient::decode(
        CONFIG_MODEL_PUBLICATION_STATUS,
        &node(),
        &publication_status(&[0x59, 0x00, 0x01, 0x00]),
    )
    .unwrap()
    .unwrap();

    match (sig.message(), vendor.message()) {
        (
            ConfigurationStatus::ModelPublication(sig),
            ConfigurationStatus::ModelPublication(vendor),
        ) => {
            assert_eq!(sig.model_identifier_width(), 16);
            assert_eq!(sig.model_identifier(), ModelIdentifier::SIG(0x1300));
            assert_eq!(vendor.model_identifier_width(), 32);
            assert_eq!(
                vendor.model_identifier(),
                ModelIdentifier::Vendor(CompanyIdentifier(0x0059), 0x0001)
            );
            assert_eq!(sig.element_address(), 0x0005);
            assert!(sig.credential_flag());
            assert_eq!(sig.publish_ttl(), 5);
            assert_eq!(sig.publish_retransmit_count(), 1);
            assert_eq!(sig.publish_retransmit_interval_steps(), 1);
            assert!(matches!(sig.publish_address(), Address::Group(_)));
        }
        other => panic!("unexpected messages {:?}", other),
    }

    for len in [0, 3, 12, 13, 15, 17, 32] {
        let parameters = vec![0u8; len];
        assert_eq!(
            ConfigurationClient::decode(CONFIG_MODEL_PUBLICATION_STATUS, &node(), &parameters),
            Err(ParseError::InvalidLength)
        );
    }
}

#[test]
fn test_unknown_status_code_is_not_an_error() {
    let mut parameters = publication_status(&[0x00, 0x10]);
    parameters[0] = 0xA7;
    let decoded = ConfigurationClient::decode(CONFIG_MODEL_PUBLICATION_STATUS, &node(), &parameters)
        .unwrap()
        .unwrap();
    assert_eq!(decoded.status(), Status::Rfu(0xA7));
    assert_eq!(decoded.status_code(), 0xA7);
    assert_eq!(decoded.status_code_name(), "RFU");
}

#[test]
fn test_decoding_is_idempotent() {
    let ctx = InboundStatusMetadata::new(UnicastAddress::new(0x0101).unwrap(), Some(Aid::from(0x2A)));
    let parameters = publication_status(&[0x00, 0x13]);

    let first = ConfigurationClient::decode(CONFIG_MODEL_PUBLICATION_STATUS, &ctx, &parameters);
    let second = ConfigurationClient::decode(CONFIG_MODEL_PUBLICATION_STATUS, &ctx, &parameters);
    assert_eq!(first, second);
    assert_eq!(first.unwrap().unwrap().aid(), Some(Aid::from(0x2A)));
}

#[test]
fn test_access_payload_round_trip() {
    let parsed = ConfigurationClient::parse(&CONFIG_APPKEY_STATUS, &[0x03, 0x01, 0x00, 0x20, 0x00])
        .unwrap()
        .unwrap();

    let mut payload: heapless::Vec<u8, 16> = heapless::Vec::new();
    parsed.opcode().emit(&mut payload).unwrap();
    parsed.emit_parameters(&mut payload).unwrap();

    let decoded = ConfigurationClient::decode_access(&node(), &payload)
        .unwrap()
        .unwrap();
    assert_eq!(decoded.message(), &parsed);
    assert_eq!(decoded.status(), Status::InvalidAppKeyIndex);
}

#[test]
fn test_other_opcodes_are_ignored() {
    // Config AppKey List
    assert_eq!(
        ConfigurationClient::decode(Opcode::TwoOctet(0x80, 0x02), &node(), &[0x00, 0x00, 0x00]),
        Ok(None)
    );
}
