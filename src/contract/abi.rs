//! Contract interface
//!
//! The function table and the decoding of `(function name, args)` pairs into
//! typed calls. Decoding is pure and happens before any state is touched.

use crate::clarity::ClarityValue;
use crate::contract::proposal::{ProposalBody, ProposalKind};
use crate::principal::Principal;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AbiError {
    #[error("{0}")]
    UnknownFunction(String),

    #[error("{function}: {reason}")]
    BadArguments { function: String, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Access {
    Public,
    ReadOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ArgType {
    Uint,
    StringAscii,
    Principal,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FunctionArg {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub ty: ArgType,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FunctionSpec {
    pub name: &'static str,
    pub access: Access,
    pub args: &'static [FunctionArg],
}

const fn arg(name: &'static str, ty: ArgType) -> FunctionArg {
    FunctionArg { name, ty }
}

const ID: &[FunctionArg] = &[arg("id", ArgType::Uint)];
const DESCRIPTION: &[FunctionArg] = &[arg("description", ArgType::StringAscii)];
const NONE: &[FunctionArg] = &[];
const WORD: &[FunctionArg] = &[
    arg("word", ArgType::StringAscii),
    arg("definition", ArgType::StringAscii),
];
const TRANSFER: &[FunctionArg] = &[
    arg("word-id", ArgType::Uint),
    arg("recipient", ArgType::Principal),
    arg("percent", ArgType::Uint),
];
const TRANSLATION: &[FunctionArg] = &[
    arg("source", ArgType::StringAscii),
    arg("target", ArgType::StringAscii),
    arg("language", ArgType::StringAscii),
];
const OWNERSHIP: &[FunctionArg] = &[
    arg("word-id", ArgType::Uint),
    arg("owner", ArgType::Principal),
];
const USER: &[FunctionArg] = &[arg("user", ArgType::Principal)];

const fn public(name: &'static str, args: &'static [FunctionArg]) -> FunctionSpec {
    FunctionSpec {
        name,
        access: Access::Public,
        args,
    }
}

const fn read_only(name: &'static str, args: &'static [FunctionArg]) -> FunctionSpec {
    FunctionSpec {
        name,
        access: Access::ReadOnly,
        args,
    }
}

pub static FUNCTIONS: &[FunctionSpec] = &[
    public("propose-word", WORD),
    public("vote-word", ID),
    public("approve-word", ID),
    public("reject-word", ID),
    public("propose-grammatical-rule", DESCRIPTION),
    public("vote-grammatical-rule", ID),
    public("approve-grammatical-rule", ID),
    public("reject-grammatical-rule", ID),
    public("propose-phonetic-change", DESCRIPTION),
    public("vote-phonetic-change", ID),
    public("approve-phonetic-change", ID),
    public("reject-phonetic-change", ID),
    public("transfer-word-ownership", TRANSFER),
    public("add-translation", TRANSLATION),
    read_only("get-word", ID),
    read_only("get-grammatical-rule", ID),
    read_only("get-phonetic-change", ID),
    read_only("get-word-ownership", OWNERSHIP),
    read_only("get-translation", ID),
    read_only("get-user-score", USER),
    read_only("get-word-count", NONE),
    read_only("get-grammatical-rule-count", NONE),
    read_only("get-phonetic-change-count", NONE),
];

pub fn lookup(name: &str) -> Option<&'static FunctionSpec> {
    FUNCTIONS.iter().find(|f| f.name == name)
}

/// State-mutating contract calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublicCall {
    Propose(ProposalBody),
    Vote(ProposalKind, u64),
    Approve(ProposalKind, u64),
    Reject(ProposalKind, u64),
    TransferWordOwnership {
        word_id: u64,
        recipient: Principal,
        percent: u64,
    },
    AddTranslation {
        source: String,
        target: String,
        language: String,
    },
}

/// Read-only contract calls
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOnlyCall {
    GetProposal(ProposalKind, u64),
    GetWordOwnership { word_id: u64, owner: Principal },
    GetTranslation(u64),
    GetUserScore(Principal),
    GetCount(ProposalKind),
}

impl PublicCall {
    pub fn decode(function: &str, args: &[ClarityValue]) -> Result<Self, AbiError> {
        let args = Args::bind(function, Access::Public, args)?;

        let call = match function {
            "propose-word" => PublicCall::Propose(ProposalBody::Word {
                word: args.string(0)?,
                definition: args.string(1)?,
            }),
            "propose-grammatical-rule" => PublicCall::Propose(ProposalBody::GrammaticalRule {
                description: args.string(0)?,
            }),
            "propose-phonetic-change" => PublicCall::Propose(ProposalBody::PhoneticChange {
                description: args.string(0)?,
            }),
            "transfer-word-ownership" => PublicCall::TransferWordOwnership {
                word_id: args.uint(0)?,
                recipient: args.principal(1)?,
                percent: args.uint(2)?,
            },
            "add-translation" => PublicCall::AddTranslation {
                source: args.string(0)?,
                target: args.string(1)?,
                language: args.string(2)?,
            },
            other => {
                let (verb, kind) = split_kind(other)
                    .ok_or_else(|| AbiError::UnknownFunction(other.to_string()))?;
                let id = args.uint(0)?;
                match verb {
                    "vote" => PublicCall::Vote(kind, id),
                    "approve" => PublicCall::Approve(kind, id),
                    "reject" => PublicCall::Reject(kind, id),
                    _ => return Err(AbiError::UnknownFunction(other.to_string())),
                }
            }
        };
        Ok(call)
    }
}

impl ReadOnlyCall {
    pub fn decode(function: &str, args: &[ClarityValue]) -> Result<Self, AbiError> {
        let args = Args::bind(function, Access::ReadOnly, args)?;

        let call = match function {
            "get-word-ownership" => ReadOnlyCall::GetWordOwnership {
                word_id: args.uint(0)?,
                owner: args.principal(1)?,
            },
            "get-translation" => ReadOnlyCall::GetTranslation(args.uint(0)?),
            "get-user-score" => ReadOnlyCall::GetUserScore(args.principal(0)?),
            other => {
                let (verb, kind) = split_kind(other.trim_end_matches("-count"))
                    .ok_or_else(|| AbiError::UnknownFunction(other.to_string()))?;
                match (verb, other.ends_with("-count")) {
                    ("get", true) => ReadOnlyCall::GetCount(kind),
                    ("get", false) => ReadOnlyCall::GetProposal(kind, args.uint(0)?),
                    _ => return Err(AbiError::UnknownFunction(other.to_string())),
                }
            }
        };
        Ok(call)
    }
}

/// `vote-grammatical-rule` -> (`vote`, GrammaticalRule)
fn split_kind(function: &str) -> Option<(&str, ProposalKind)> {
    ProposalKind::ALL.iter().find_map(|kind| {
        function
            .strip_suffix(kind.slug())
            .and_then(|rest| rest.strip_suffix('-'))
            .map(|verb| (verb, *kind))
    })
}

/// Arguments checked against a function's declared signature
struct Args<'a> {
    spec: &'static FunctionSpec,
    values: &'a [ClarityValue],
}

impl<'a> Args<'a> {
    fn bind(function: &str, access: Access, values: &'a [ClarityValue]) -> Result<Self, AbiError> {
        let spec = lookup(function)
            .filter(|spec| spec.access == access)
            .ok_or_else(|| AbiError::UnknownFunction(function.to_string()))?;

        if values.len() != spec.args.len() {
            return Err(AbiError::BadArguments {
                function: function.to_string(),
                reason: format!("expected {} arguments, got {}", spec.args.len(), values.len()),
            });
        }
        Ok(Self { spec, values })
    }

    fn mismatch(&self, idx: usize) -> AbiError {
        let declared = &self.spec.args[idx];
        AbiError::BadArguments {
            function: self.spec.name.to_string(),
            reason: format!(
                "argument '{}' expects {:?}, got {}",
                declared.name,
                declared.ty,
                self.values[idx].type_name()
            ),
        }
    }

    fn uint(&self, idx: usize) -> Result<u64, AbiError> {
        self.values[idx].as_uint().ok_or_else(|| self.mismatch(idx))
    }

    fn string(&self, idx: usize) -> Result<String, AbiError> {
        self.values[idx]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| self.mismatch(idx))
    }

    fn principal(&self, idx: usize) -> Result<Principal, AbiError> {
        self.values[idx]
            .as_principal()
            .cloned()
            .ok_or_else(|| self.mismatch(idx))
    }
}
