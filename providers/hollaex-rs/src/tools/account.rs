//! Account tools: balance and user profile

use futures::future::BoxFuture;

use super::definition::{Access, Params, ToolDefinition, ToolOutput};
use super::params::NoParams;
use super::schema::ToolSchema;
use crate::error::ToolError;
use crate::hollaex::Exchange;

pub fn definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: "getUserBalance",
            title: "Get User Balance",
            description: "Returns the authenticated user's balances per asset \
                          (e.g. btc_balance, btc_available).",
            input: ToolSchema::of::<NoParams>(),
            output: ToolSchema::any(),
            access: Access::Private,
            mutating: false,
            check: None,
            handler: get_user_balance,
        },
        ToolDefinition {
            name: "getUser",
            title: "Get User",
            description: "Returns the authenticated user's profile, settings and verification level.",
            input: ToolSchema::of::<NoParams>(),
            output: ToolSchema::any(),
            access: Access::Private,
            mutating: false,
            check: None,
            handler: get_user,
        },
    ]
}

fn get_user_balance(exchange: &dyn Exchange, _params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let balance = exchange.get_balance().await?;
        Ok(ToolOutput::new("Retrieved balance", balance))
    })
}

fn get_user(exchange: &dyn Exchange, _params: Params) -> BoxFuture<'_, Result<ToolOutput, ToolError>> {
    Box::pin(async move {
        let user = exchange.get_user().await?;
        Ok(ToolOutput::new("Retrieved user profile", user))
    })
}
