//! Account resolution for intent program instructions
//!
//! The program requires every account an instruction touches to be declared
//! up front, in a fixed order. [`IntentResolver`] builds that list for each
//! operation, branching on the asset kind of the order and on whether the
//! order settles on the network it was created on.
//!
//! Optional accounts that an operation does not use are filled with the
//! program id, which the program reads as "absent".

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use solana_program::instruction::{AccountMeta, Instruction};
use solana_program::pubkey::Pubkey;
use solana_program::system_program;
use swap_intents_common::{
    decode_envelope, fee, keccak256, DecodedEnvelope, FeeError, FeeSplit, Resolution, SwapOrder,
    FEE_DENOMINATOR,
};

use crate::constants::{ASSOCIATED_TOKEN_PROGRAM_ID, NATIVE_ADDRESS, TOKEN_PROGRAM_ID};
use crate::error::ResolveError;
use crate::instruction::{
    CancelArgs, FillArgs, InitializeArgs, IntentInstruction, RecvMessageArgs, SetAdminArgs,
    SetFeeHandlerArgs, SetProtocolFeeArgs, SwapArgs,
};
use crate::pda;
use crate::state::ConfigSnapshot;

// ============================================================================
// ASSETS AND ADDRESSES
// ============================================================================

/// Asset named by an order's `token` or `to_token` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Native,
    Token(Pubkey),
}

impl AssetKind {
    /// Parses an asset field: the native sentinel or a mint address.
    pub fn parse(field: &'static str, value: &str) -> Result<Self, ResolveError> {
        if value == NATIVE_ADDRESS {
            return Ok(AssetKind::Native);
        }
        Pubkey::from_str(value)
            .map(AssetKind::Token)
            .map_err(|_| ResolveError::UnsupportedAsset {
                field,
                value: value.to_string(),
            })
    }

    pub fn mint(&self) -> Option<Pubkey> {
        match self {
            AssetKind::Native => None,
            AssetKind::Token(mint) => Some(*mint),
        }
    }
}

fn parse_address(field: &'static str, value: &str) -> Result<Pubkey, ResolveError> {
    Pubkey::from_str(value).map_err(|_| ResolveError::InvalidAddress { field })
}

// ============================================================================
// REQUESTS AND RESULTS
// ============================================================================

/// Operation to resolve, with the identities it is performed by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveRequest {
    /// Deposit and escrow a new order on its origin network
    Create { signer: Pubkey, order: SwapOrder },
    /// Pay out an order on its destination network
    Fill {
        signer: Pubkey,
        order: SwapOrder,
        /// Solver address on the origin network, paid from escrow
        solver_address: String,
    },
    /// Cancel an order from its origin network
    Cancel { signer: Pubkey, order: SwapOrder },
    /// Deliver a relay message
    ReceiveMessage {
        signer: Pubkey,
        src_nid: String,
        conn_sn: u128,
        msg: Vec<u8>,
    },
}

impl ResolveRequest {
    pub fn operation(&self) -> &'static str {
        match self {
            ResolveRequest::Create { .. } => "create",
            ResolveRequest::Fill { .. } => "fill",
            ResolveRequest::Cancel { .. } => "cancel",
            ResolveRequest::ReceiveMessage { .. } => "receive_message",
        }
    }
}

/// Instruction arguments and the ordered accounts the program expects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInstruction {
    pub args: IntentInstruction,
    pub accounts: Vec<AccountMeta>,
    /// Predicted fee and payout of `to_amount`, set for fills
    pub settlement: Option<FeeSplit>,
}

impl ResolvedInstruction {
    pub fn data(&self) -> Result<Vec<u8>, ResolveError> {
        self.args.data()
    }

    /// Builds the unsigned instruction for submission.
    pub fn to_instruction(&self, program_id: Pubkey) -> Result<Instruction, ResolveError> {
        Ok(Instruction {
            program_id,
            accounts: self.accounts.clone(),
            data: self.data()?,
        })
    }
}

/// One page of a resolved account list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryAccountsPage {
    pub accounts: Vec<AccountMetaView>,
    pub total_accounts: usize,
    pub page: u8,
    pub limit: u8,
    pub has_next_page: bool,
}

/// Serializable account descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMetaView {
    pub pubkey: String,
    pub is_writable: bool,
    pub is_signer: bool,
}

impl From<&AccountMeta> for AccountMetaView {
    fn from(meta: &AccountMeta) -> Self {
        Self {
            pubkey: meta.pubkey.to_string(),
            is_writable: meta.is_writable,
            is_signer: meta.is_signer,
        }
    }
}

/// Splits `accounts` into 1-based pages of `limit` entries.
///
/// Page 0 is read as page 1. A zero limit yields an empty page.
pub fn paginate(accounts: &[AccountMeta], page: u8, limit: u8) -> QueryAccountsPage {
    let page = page.max(1);
    let total_accounts = accounts.len();
    let start = ((page as usize - 1) * limit as usize).min(total_accounts);
    let end = (start + limit as usize).min(total_accounts);

    QueryAccountsPage {
        accounts: accounts[start..end].iter().map(AccountMetaView::from).collect(),
        total_accounts,
        page,
        limit,
        has_next_page: limit > 0 && end < total_accounts,
    }
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Builds account lists for one deployment of the intent program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntentResolver {
    program_id: Pubkey,
}

impl IntentResolver {
    pub fn new(program_id: Pubkey) -> Self {
        Self { program_id }
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    /// Resolves `request` against the given Config snapshot.
    ///
    /// # Arguments
    ///
    /// * `request` - Operation and the identities performing it
    /// * `snapshot` - Config read immediately before resolution
    ///
    /// # Returns
    ///
    /// * `Ok(ResolvedInstruction)` - Arguments, ordered accounts and predicted settlement
    /// * `Err(ResolveError)` - Invalid order, identity or envelope
    pub fn resolve(
        &self,
        request: &ResolveRequest,
        snapshot: &ConfigSnapshot,
    ) -> Result<ResolvedInstruction, ResolveError> {
        let resolved = match request {
            ResolveRequest::Create { signer, order } => self.resolve_create(signer, order)?,
            ResolveRequest::Fill {
                signer,
                order,
                solver_address,
            } => self.resolve_fill(signer, order, solver_address, snapshot)?,
            ResolveRequest::Cancel { signer, order } => self.resolve_cancel(signer, order)?,
            ResolveRequest::ReceiveMessage {
                signer,
                src_nid,
                conn_sn,
                msg,
            } => {
                let envelope = decode_envelope(src_nid, *conn_sn, msg)?;
                self.resolve_envelope(signer, snapshot, &envelope, msg)?
            }
        };

        tracing::debug!(
            operation = request.operation(),
            accounts = resolved.accounts.len(),
            "Resolved intent instruction"
        );
        Ok(resolved)
    }

    fn resolve_create(
        &self,
        signer: &Pubkey,
        order: &SwapOrder,
    ) -> Result<ResolvedInstruction, ResolveError> {
        let creator = parse_address("creator", &order.creator)?;
        if creator != *signer {
            return Err(ResolveError::SignerMismatch);
        }
        let asset = AssetKind::parse("token", &order.token)?;

        let (config, _) = pda::config(&self.program_id)?;
        let (order_pda, _) = pda::order(
            &self.program_id,
            &creator,
            &order.dst_nid,
            order.amount,
            order.to_amount,
        )?;

        let mut accounts = vec![
            AccountMeta::new(*signer, true),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new(config, false),
            AccountMeta::new(order_pda, false),
        ];

        match asset {
            AssetKind::Native => {
                let (vault_native, _) = pda::vault_native(&self.program_id)?;
                accounts.push(AccountMeta::new(vault_native, false));
                accounts.push(self.placeholder());
                accounts.push(self.placeholder());
                accounts.push(self.placeholder());
            }
            AssetKind::Token(mint) => {
                let (vault_token, _) = pda::vault_token(&self.program_id, &mint)?;
                accounts.push(self.placeholder());
                accounts.push(AccountMeta::new(vault_token, false));
                accounts.push(AccountMeta::new(
                    pda::associated_token_address(signer, &mint)?,
                    false,
                ));
                accounts.push(AccountMeta::new_readonly(mint, false));
            }
        }
        accounts.push(AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false));

        tracing::debug!(
            asset = ?asset,
            dst_nid = %order.dst_nid,
            "Resolved create accounts"
        );

        Ok(ResolvedInstruction {
            args: IntentInstruction::Swap(SwapArgs {
                order: order.into(),
            }),
            accounts,
            settlement: None,
        })
    }

    fn resolve_fill(
        &self,
        signer: &Pubkey,
        order: &SwapOrder,
        solver_address: &str,
        snapshot: &ConfigSnapshot,
    ) -> Result<ResolvedInstruction, ResolveError> {
        if !order.has_id() {
            return Err(ResolveError::UnassignedOrderId);
        }
        if solver_address.is_empty() {
            return Err(ResolveError::MissingSolver);
        }
        if order.destination_address.is_empty() {
            return Err(ResolveError::MissingDestination);
        }
        let destination = parse_address("destination_address", &order.destination_address)?;
        let asset = AssetKind::parse("to_token", &order.to_token)?;
        let settlement = fee::split(order.to_amount, snapshot.protocol_fee)?;

        if snapshot.network_id != order.dst_nid {
            tracing::warn!(
                network_id = %snapshot.network_id,
                dst_nid = %order.dst_nid,
                "Filling an order on a network other than its destination"
            );
        }

        let (config, _) = pda::config(&self.program_id)?;
        let (order_finished, _) = pda::order_finished(&self.program_id, &order.hash())?;

        let mut accounts = vec![
            AccountMeta::new(*signer, true),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new(config, false),
            AccountMeta::new(snapshot.fee_handler, false),
            AccountMeta::new(destination, false),
            AccountMeta::new(order_finished, false),
        ];

        match asset {
            AssetKind::Native => {
                accounts.extend(std::iter::repeat_with(|| self.placeholder()).take(4));
            }
            AssetKind::Token(mint) => {
                for owner in [&snapshot.fee_handler, &destination, signer] {
                    accounts.push(AccountMeta::new(
                        pda::associated_token_address(owner, &mint)?,
                        false,
                    ));
                }
                accounts.push(AccountMeta::new_readonly(mint, false));
            }
        }
        accounts.push(AccountMeta::new_readonly(TOKEN_PROGRAM_ID, false));
        accounts.push(AccountMeta::new_readonly(ASSOCIATED_TOKEN_PROGRAM_ID, false));

        if order.is_same_network() {
            let solver = parse_address("solver_address", solver_address)?;
            self.push_fill_resolution(&mut accounts, order, &solver)?;
        }

        tracing::debug!(
            order_id = order.id,
            asset = ?asset,
            same_network = order.is_same_network(),
            fee = settlement.fee,
            payout = settlement.payout,
            "Resolved fill accounts"
        );

        Ok(ResolvedInstruction {
            args: IntentInstruction::Fill(FillArgs {
                order: order.into(),
                solver_address: solver_address.to_string(),
            }),
            accounts,
            settlement: Some(settlement),
        })
    }

    fn resolve_cancel(
        &self,
        signer: &Pubkey,
        order: &SwapOrder,
    ) -> Result<ResolvedInstruction, ResolveError> {
        let creator = parse_address("creator", &order.creator)?;
        if creator != *signer {
            return Err(ResolveError::SignerMismatch);
        }

        let (config, _) = pda::config(&self.program_id)?;
        let (order_pda, _) = pda::order(
            &self.program_id,
            &creator,
            &order.dst_nid,
            order.amount,
            order.to_amount,
        )?;

        let mut accounts = vec![
            AccountMeta::new(*signer, true),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new(config, false),
            AccountMeta::new(order_pda, false),
        ];

        // cross-network cancels are settled on the destination by relay
        if order.is_same_network() {
            if !order.has_id() {
                return Err(ResolveError::UnassignedOrderId);
            }
            let (order_finished, _) = pda::order_finished(&self.program_id, &order.hash())?;
            accounts.push(AccountMeta::new(order_finished, false));
        } else {
            accounts.push(self.placeholder());
        }

        Ok(ResolvedInstruction {
            args: IntentInstruction::Cancel(CancelArgs {
                order: order.into(),
            }),
            accounts,
            settlement: None,
        })
    }

    /// Resolves delivery of an already decoded relay message.
    ///
    /// Only the Config admin may deliver messages. `msg` must be the raw
    /// bytes `envelope` was decoded from; they are passed to the program
    /// unchanged.
    pub fn resolve_envelope(
        &self,
        signer: &Pubkey,
        snapshot: &ConfigSnapshot,
        envelope: &DecodedEnvelope,
        msg: &[u8],
    ) -> Result<ResolvedInstruction, ResolveError> {
        if snapshot.admin != *signer {
            return Err(ResolveError::SignerMismatch);
        }
        let src_nid = &envelope.replay_key.src_nid;
        let conn_sn = envelope.replay_key.conn_sn;
        let order = &envelope.order;

        let (config, _) = pda::config(&self.program_id)?;
        let (receipt, _) = pda::receipt(&self.program_id, src_nid, conn_sn)?;

        let mut accounts = vec![
            AccountMeta::new(*signer, true),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new_readonly(config, false),
            AccountMeta::new(receipt, false),
        ];

        match &envelope.resolution {
            Resolution::Fill(fill) => {
                if *src_nid != order.dst_nid {
                    return Err(ResolveError::NetworkMismatch {
                        expected: order.dst_nid.clone(),
                        found: src_nid.clone(),
                    });
                }
                let solver = parse_address("solver", &fill.solver)?;
                self.push_fill_resolution(&mut accounts, order, &solver)?;
            }
            Resolution::Cancel(cancel) => {
                if *src_nid != order.src_nid {
                    return Err(ResolveError::NetworkMismatch {
                        expected: order.src_nid.clone(),
                        found: src_nid.clone(),
                    });
                }
                if !order.has_id() {
                    return Err(ResolveError::UnassignedOrderId);
                }
                let (order_finished, _) =
                    pda::order_finished(&self.program_id, &keccak256(&cancel.order_bytes))?;
                accounts.push(AccountMeta::new(config, false));
                accounts.push(AccountMeta::new(order_finished, false));
                accounts.push(self.placeholder_mut());
            }
        }

        tracing::debug!(
            src_nid = %src_nid,
            conn_sn,
            message_type = envelope.message_type.as_str(),
            order_id = order.id,
            "Resolved receive message accounts"
        );

        Ok(ResolvedInstruction {
            args: IntentInstruction::RecvMessage(RecvMessageArgs {
                src_network: src_nid.clone(),
                conn_sn,
                msg: msg.to_vec(),
            }),
            accounts,
            settlement: None,
        })
    }

    /// Appends the accounts that release an order's origin escrow to `solver`.
    ///
    /// Shared by same-network fills and relayed fill confirmations. Every
    /// entry is writable, placeholders included.
    fn push_fill_resolution(
        &self,
        accounts: &mut Vec<AccountMeta>,
        order: &SwapOrder,
        solver: &Pubkey,
    ) -> Result<(), ResolveError> {
        let creator = parse_address("creator", &order.creator)?;
        let asset = AssetKind::parse("token", &order.token)?;
        let (config, _) = pda::config(&self.program_id)?;
        let (order_pda, _) = pda::order(
            &self.program_id,
            &creator,
            &order.dst_nid,
            order.amount,
            order.to_amount,
        )?;

        accounts.push(AccountMeta::new(config, false));
        accounts.push(AccountMeta::new(order_pda, false));
        accounts.push(AccountMeta::new(creator, false));
        accounts.push(AccountMeta::new(*solver, false));

        match asset {
            AssetKind::Native => {
                let (vault_native, _) = pda::vault_native(&self.program_id)?;
                accounts.push(self.placeholder_mut());
                accounts.push(AccountMeta::new(vault_native, false));
                accounts.push(self.placeholder_mut());
                accounts.push(self.placeholder_mut());
            }
            AssetKind::Token(mint) => {
                let (vault_token, _) = pda::vault_token(&self.program_id, &mint)?;
                accounts.push(AccountMeta::new(
                    pda::associated_token_address(solver, &mint)?,
                    false,
                ));
                accounts.push(self.placeholder_mut());
                accounts.push(AccountMeta::new(vault_token, false));
                accounts.push(AccountMeta::new(mint, false));
            }
        }

        accounts.push(AccountMeta::new(TOKEN_PROGRAM_ID, false));
        accounts.push(AccountMeta::new(ASSOCIATED_TOKEN_PROGRAM_ID, false));
        Ok(())
    }

    fn placeholder(&self) -> AccountMeta {
        AccountMeta::new_readonly(self.program_id, false)
    }

    fn placeholder_mut(&self) -> AccountMeta {
        AccountMeta::new(self.program_id, false)
    }

    // ------------------------------------------------------------------------
    // Admin operations
    // ------------------------------------------------------------------------

    /// Creates the Config account and the native vault.
    pub fn initialize(
        &self,
        signer: &Pubkey,
        network_id: &str,
        fee_handler: &Pubkey,
    ) -> Result<ResolvedInstruction, ResolveError> {
        let (config, _) = pda::config(&self.program_id)?;
        let (vault_native, _) = pda::vault_native(&self.program_id)?;

        Ok(ResolvedInstruction {
            args: IntentInstruction::Initialize(InitializeArgs {
                network_id: network_id.to_string(),
                fee_handler: *fee_handler,
            }),
            accounts: vec![
                AccountMeta::new(config, false),
                AccountMeta::new(vault_native, false),
                AccountMeta::new(*signer, true),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            settlement: None,
        })
    }

    pub fn set_admin(
        &self,
        snapshot: &ConfigSnapshot,
        signer: &Pubkey,
        account: &Pubkey,
    ) -> Result<ResolvedInstruction, ResolveError> {
        self.admin_instruction(
            snapshot,
            signer,
            IntentInstruction::SetAdmin(SetAdminArgs { account: *account }),
        )
    }

    /// Sets the protocol fee in basis points, at most 10000.
    pub fn set_protocol_fee(
        &self,
        snapshot: &ConfigSnapshot,
        signer: &Pubkey,
        fee: u64,
    ) -> Result<ResolvedInstruction, ResolveError> {
        if fee > FEE_DENOMINATOR {
            return Err(FeeError::InvalidProtocolFee(fee).into());
        }
        self.admin_instruction(
            snapshot,
            signer,
            IntentInstruction::SetProtocolFee(SetProtocolFeeArgs { fee }),
        )
    }

    pub fn set_fee_handler(
        &self,
        snapshot: &ConfigSnapshot,
        signer: &Pubkey,
        fee_handler: &Pubkey,
    ) -> Result<ResolvedInstruction, ResolveError> {
        self.admin_instruction(
            snapshot,
            signer,
            IntentInstruction::SetFeeHandler(SetFeeHandlerArgs {
                fee_handler: *fee_handler,
            }),
        )
    }

    fn admin_instruction(
        &self,
        snapshot: &ConfigSnapshot,
        signer: &Pubkey,
        args: IntentInstruction,
    ) -> Result<ResolvedInstruction, ResolveError> {
        if snapshot.admin != *signer {
            return Err(ResolveError::SignerMismatch);
        }
        let (config, _) = pda::config(&self.program_id)?;

        Ok(ResolvedInstruction {
            args,
            accounts: vec![AccountMeta::new(config, false), AccountMeta::new(*signer, true)],
            settlement: None,
        })
    }
}
