//! Resource ID for a Communications Gateway

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const PROVIDER_NAMESPACE: &str = "Microsoft.VoiceServices";
const RESOURCE_TYPE_SEGMENT: &str = "communicationsGateways";

/// Example rendered ID, used in error messages
pub const EXAMPLE_ID: &str = "/subscriptions/12345678-1234-9876-4563-123456789012/resourceGroups/example-resource-group/providers/Microsoft.VoiceServices/communicationsGateways/communicationsGatewayValue";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdParseError {
    #[error("parsing {input:?}: expected {expected} segments but got {got} - the ID should be in the format {:?}", EXAMPLE_ID)]
    SegmentCount {
        input: String,
        expected: usize,
        got: usize,
    },

    #[error("parsing {input:?}: expected the segment {expected:?} at position {position} but got {got:?}")]
    UnexpectedSegment {
        input: String,
        position: usize,
        expected: &'static str,
        got: String,
    },

    #[error("parsing {input:?}: the segment {name:?} was empty")]
    EmptySegment { input: String, name: &'static str },
}

enum Segment {
    Static(&'static str),
    User(&'static str),
}

const SEGMENTS: [Segment; 8] = [
    Segment::Static("subscriptions"),
    Segment::User("subscriptionId"),
    Segment::Static("resourceGroups"),
    Segment::User("resourceGroupName"),
    Segment::Static("providers"),
    Segment::Static(PROVIDER_NAMESPACE),
    Segment::Static(RESOURCE_TYPE_SEGMENT),
    Segment::User("communicationsGatewayName"),
];

/// Composite identity of a Communications Gateway
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommunicationsGatewayId {
    pub subscription_id: String,
    pub resource_group_name: String,
    pub communications_gateway_name: String,
}

impl CommunicationsGatewayId {
    pub fn new(
        subscription_id: impl Into<String>,
        resource_group_name: impl Into<String>,
        communications_gateway_name: impl Into<String>,
    ) -> Self {
        Self {
            subscription_id: subscription_id.into(),
            resource_group_name: resource_group_name.into(),
            communications_gateway_name: communications_gateway_name.into(),
        }
    }

    /// Parse an ID, matching the fixed segments exactly
    pub fn parse(input: &str) -> Result<Self, IdParseError> {
        Self::parse_with(input, false)
    }

    /// Parse an ID, matching the fixed segments case-insensitively
    pub fn parse_insensitively(input: &str) -> Result<Self, IdParseError> {
        Self::parse_with(input, true)
    }

    /// Check that `input` is a well-formed ID
    pub fn validate(input: &str) -> Result<(), String> {
        Self::parse(input).map(|_| ()).map_err(|e| e.to_string())
    }

    fn parse_with(input: &str, insensitively: bool) -> Result<Self, IdParseError> {
        let parts: Vec<&str> = input.strip_prefix('/').unwrap_or(input).split('/').collect();
        if parts.len() != SEGMENTS.len() {
            return Err(IdParseError::SegmentCount {
                input: input.to_string(),
                expected: SEGMENTS.len(),
                got: parts.len(),
            });
        }

        let mut values = Vec::with_capacity(3);
        for (position, (segment, part)) in SEGMENTS.iter().zip(&parts).enumerate() {
            match segment {
                Segment::Static(expected) => {
                    let matches = if insensitively {
                        part.eq_ignore_ascii_case(expected)
                    } else {
                        part == expected
                    };
                    if !matches {
                        return Err(IdParseError::UnexpectedSegment {
                            input: input.to_string(),
                            position,
                            expected: *expected,
                            got: part.to_string(),
                        });
                    }
                }
                Segment::User(name) => {
                    if part.is_empty() {
                        return Err(IdParseError::EmptySegment {
                            input: input.to_string(),
                            name: *name,
                        });
                    }
                    values.push(part.to_string());
                }
            }
        }

        let [subscription_id, resource_group_name, communications_gateway_name] =
            <[String; 3]>::try_from(values).map_err(|_| IdParseError::SegmentCount {
                input: input.to_string(),
                expected: SEGMENTS.len(),
                got: parts.len(),
            })?;

        Ok(Self {
            subscription_id,
            resource_group_name,
            communications_gateway_name,
        })
    }
}

impl fmt::Display for CommunicationsGatewayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "/subscriptions/{}/resourceGroups/{}/providers/{}/{}/{}",
            self.subscription_id,
            self.resource_group_name,
            PROVIDER_NAMESPACE,
            RESOURCE_TYPE_SEGMENT,
            self.communications_gateway_name
        )
    }
}

impl FromStr for CommunicationsGatewayId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
