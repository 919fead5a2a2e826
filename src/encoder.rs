//! Remote call instruction construction.
//!
//! The orchestrator only ever emits two instruction shapes: "deploy this
//! artifact through the remote domain's CREATE2 deployer" and "invoke this
//! function on this already-known address". Both carry an explicit gas budget
//! and zero value, and both are opaque once built: there is no return channel
//! from the remote domain.

use ethers::abi::{self, Token};
use ethers::types::{Address, Bytes, H256, U256};
use ethers::utils::id;
use serde::{Deserialize, Serialize};

/// Withdrawal destination for a fee vault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum WithdrawalNetwork {
    /// Forward withdrawals to the coordinating domain (L1)
    Coordinating = 0,
    /// Keep withdrawals on the local remote domain
    Local = 1,
}

impl WithdrawalNetwork {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

/// One fire-and-forget message to a remote domain: the unit handed to the
/// outbound relay primitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteCallInstruction {
    pub target: Address,
    /// Always zero in this system; the field exists because the relay
    /// primitive's envelope carries it.
    pub value: U256,
    pub gas_limit: u64,
    /// Always false: deployments go through the CREATE2 deployer contract,
    /// never through raw creation transactions.
    pub is_creation: bool,
    pub data: Bytes,
}

impl RemoteCallInstruction {
    fn call(target: Address, gas_limit: u64, data: Bytes) -> Self {
        Self {
            target,
            value: U256::zero(),
            gas_limit,
            is_creation: false,
            data,
        }
    }
}

fn calldata(signature: &str, args: &[Token]) -> Bytes {
    let mut data = id(signature).to_vec();
    data.extend_from_slice(&abi::encode(args));
    data.into()
}

/// `deploy(uint256 value, bytes32 salt, bytes code)` on the remote CREATE2
/// deployer. Idempotent remotely: re-deploying identical salt+code lands on
/// the same address as a no-op.
pub fn deploy_via_create2(
    create2_deployer: Address,
    salt: H256,
    init_code: Bytes,
    gas_limit: u64,
) -> RemoteCallInstruction {
    let data = calldata(
        "deploy(uint256,bytes32,bytes)",
        &[
            Token::Uint(U256::zero()),
            Token::FixedBytes(salt.as_bytes().to_vec()),
            Token::Bytes(init_code.to_vec()),
        ],
    );
    RemoteCallInstruction::call(create2_deployer, gas_limit, data)
}

/// `upgradeAndCall(address proxy, address implementation, bytes data)` on the
/// remote proxy admin: atomically repoints the proxy and runs the initializer
/// in the same remote transaction.
pub fn upgrade_and_call(
    proxy_admin: Address,
    proxy: Address,
    implementation: Address,
    init_data: Bytes,
    gas_limit: u64,
) -> RemoteCallInstruction {
    let data = calldata(
        "upgradeAndCall(address,address,bytes)",
        &[
            Token::Address(proxy),
            Token::Address(implementation),
            Token::Bytes(init_data.to_vec()),
        ],
    );
    RemoteCallInstruction::call(proxy_admin, gas_limit, data)
}

/// Plain invocation on an already-known remote address.
pub fn contract_call(target: Address, data: Bytes, gas_limit: u64) -> RemoteCallInstruction {
    RemoteCallInstruction::call(target, gas_limit, data)
}

/// `initialize(address recipient, uint256 minWithdrawalAmount, uint8 network)`
/// payload for an upgraded fee vault.
pub fn vault_initialize_data(
    recipient: Address,
    min_withdrawal: U256,
    network: WithdrawalNetwork,
) -> Bytes {
    calldata(
        "initialize(address,uint256,uint8)",
        &[
            Token::Address(recipient),
            Token::Uint(min_withdrawal),
            Token::Uint(U256::from(network.as_u8())),
        ],
    )
}

/// `setConfig(address recipient, uint256 minWithdrawalAmount, uint8 network)`
/// payload for a vault whose proxy already points at upgraded code.
pub fn vault_set_config_data(
    recipient: Address,
    min_withdrawal: U256,
    network: WithdrawalNetwork,
) -> Bytes {
    calldata(
        "setConfig(address,uint256,uint8)",
        &[
            Token::Address(recipient),
            Token::Uint(min_withdrawal),
            Token::Uint(U256::from(network.as_u8())),
        ],
    )
}

/// `initialize(address calculator)` payload for the fund router. A zero
/// calculator address is the explicit disabled state.
pub fn router_initialize_data(calculator: Address) -> Bytes {
    calldata("initialize(address)", &[Token::Address(calculator)])
}

/// `setCalculator(address calculator)` payload for an already-initialized
/// fund router.
pub fn router_set_calculator_data(calculator: Address) -> Bytes {
    calldata("setCalculator(address)", &[Token::Address(calculator)])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(b: u8) -> Address {
        Address::repeat_byte(b)
    }

    #[test]
    fn deploy_instruction_targets_the_deployer_with_zero_value() {
        let deployer = addr(0xd0);
        let salt = H256::repeat_byte(0x5a);
        let code: Bytes = vec![0x60, 0x01].into();
        let instr = deploy_via_create2(deployer, salt, code.clone(), 3_000_000);

        assert_eq!(instr.target, deployer);
        assert_eq!(instr.value, U256::zero());
        assert_eq!(instr.gas_limit, 3_000_000);
        assert!(!instr.is_creation);
        assert_eq!(&instr.data[..4], &id("deploy(uint256,bytes32,bytes)")[..]);
        // salt sits in the second argument word
        assert_eq!(&instr.data[4 + 32..4 + 64], salt.as_bytes());
    }

    #[test]
    fn upgrade_and_call_encodes_proxy_then_implementation() {
        let instr = upgrade_and_call(addr(0xad), addr(0x01), addr(0x02), Bytes::new(), 500_000);
        assert_eq!(instr.target, addr(0xad));
        assert_eq!(
            &instr.data[..4],
            &id("upgradeAndCall(address,address,bytes)")[..]
        );
        // addresses are right-aligned in their 32-byte words
        assert_eq!(&instr.data[4 + 12..4 + 32], addr(0x01).as_bytes());
        assert_eq!(&instr.data[4 + 44..4 + 64], addr(0x02).as_bytes());
    }

    #[test]
    fn vault_payloads_share_argument_layout() {
        let init = vault_initialize_data(addr(0x11), U256::from(5), WithdrawalNetwork::Local);
        let set = vault_set_config_data(addr(0x11), U256::from(5), WithdrawalNetwork::Local);
        assert_eq!(&init[..4], &id("initialize(address,uint256,uint8)")[..]);
        assert_eq!(&set[..4], &id("setConfig(address,uint256,uint8)")[..]);
        // identical arguments, different selector
        assert_eq!(&init[4..], &set[4..]);
        assert_eq!(init[4 + 95], WithdrawalNetwork::Local.as_u8());
    }

    #[test]
    fn router_disabled_state_is_the_zero_calculator() {
        let data = router_initialize_data(Address::zero());
        assert_eq!(&data[..4], &id("initialize(address)")[..]);
        assert!(data[4..].iter().all(|b| *b == 0));
    }

    #[test]
    fn withdrawal_network_discriminants_are_stable() {
        assert_eq!(WithdrawalNetwork::Coordinating.as_u8(), 0);
        assert_eq!(WithdrawalNetwork::Local.as_u8(), 1);
    }

    /// Captured batches get handed to external replay tooling as JSON; the
    /// envelope has to survive that round trip byte-for-byte.
    #[test]
    fn instruction_envelope_round_trips_through_json() {
        let instr = deploy_via_create2(
            addr(0xd0),
            H256::repeat_byte(0x5a),
            vec![0x60, 0x01].into(),
            3_000_000,
        );
        let json = serde_json::to_string(&instr).unwrap();
        let back: RemoteCallInstruction = serde_json::from_str(&json).unwrap();
        assert_eq!(instr, back);
    }
}
