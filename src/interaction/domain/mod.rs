//! Domain model for inbound interactions and their replies.
//!
//! Wire payloads decode into [`Interaction`]; the dispatcher pairs them with
//! a registered command, rebuilds [`CommandArguments`] and hands the handler
//! an [`InteractionContext`].

mod arguments;
mod context;
mod embed;
mod response;
mod signature;
mod wire;

pub use arguments::{
    ArgumentError, ArgumentValue, CommandArguments, ExtractionError, extract_arguments,
};
pub use context::{DeferredContext, ImmediateContext, InteractionContext};
pub use embed::{Embed, EmbedField, EmbedThumbnail};
pub use response::{
    AllowedMentions, InteractionReply, InteractionResponse, InteractionResponseType,
    MessagePayload, WebhookEditBody,
};
pub use signature::{BadSignature, PublicKeyError, SignatureVerifier};
pub use wire::{
    ApplicationCommandData, Channel, ChannelType, Interaction, InteractionType, Mentionable,
    ResolvedData, Role, SubmittedOption, User,
};
