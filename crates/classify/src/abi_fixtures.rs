use alloy::primitives::aliases::{I24, U24};
use alloy::primitives::{address, hex, Address, U256};
use alloy::sol_types::SolCall;
use radar_decode::abi::INonfungiblePositionManager::{
    collectCall, increaseLiquidityCall, mintCall, refundETHCall, sweepTokenCall, unwrapWETH9Call,
};
use radar_decode::abi::{CollectParams, IncreaseLiquidityParams, MintParams};

pub const RECIPIENT: Address = address!("0x7f02609ccfb440aa98a95b5ec6814bfe7f6cd406");

pub fn mint_call(token0: Address, token1: Address, amount0: U256, amount1: U256) -> Vec<u8> {
    mintCall {
        params: MintParams {
            token0,
            token1,
            fee: U24::from_limbs([3_000]),
            tickLower: I24::ZERO,
            tickUpper: I24::ZERO,
            amount0Desired: amount0,
            amount1Desired: amount1,
            amount0Min: U256::ZERO,
            amount1Min: U256::ZERO,
            recipient: RECIPIENT,
            deadline: U256::from(1_800_000_000u64),
        },
    }
    .abi_encode()
}

pub fn increase_call(amount0: U256, amount1: U256) -> Vec<u8> {
    increaseLiquidityCall {
        params: IncreaseLiquidityParams {
            tokenId: U256::from(42u64),
            amount0Desired: amount0,
            amount1Desired: amount1,
            amount0Min: U256::ZERO,
            amount1Min: U256::ZERO,
            deadline: U256::from(1_800_000_000u64),
        },
    }
    .abi_encode()
}

pub fn collect_call(token_id: u64) -> Vec<u8> {
    collectCall {
        params: CollectParams {
            tokenId: U256::from(token_id),
            recipient: Address::ZERO,
            amount0Max: u128::MAX,
            amount1Max: u128::MAX,
        },
    }
    .abi_encode()
}

pub fn unwrap_call(minimum: U256) -> Vec<u8> {
    unwrapWETH9Call {
        amountMinimum: minimum,
        recipient: RECIPIENT,
    }
    .abi_encode()
}

pub fn sweep_call(token: Address, minimum: U256) -> Vec<u8> {
    sweepTokenCall {
        token,
        amountMinimum: minimum,
        recipient: RECIPIENT,
    }
    .abi_encode()
}

pub fn refund_call() -> Vec<u8> {
    refundETHCall {}.abi_encode()
}

pub fn to_hex(call: &[u8]) -> String {
    format!("0x{}", hex::encode(call))
}
