pub mod betting_contract;
pub mod link_token_contract;
