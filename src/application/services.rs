//! Services - every handler wired over one set of port implementations.
//!
//! The binary builds this once from Postgres, Stripe, local storage and the
//! JWT authority; tests build it from the in-memory adapters.

use std::sync::Arc;

use crate::ports::{
    Clock, ContentRepository, FileStorage, PasswordHasher, PaymentGateway,
    SubscriptionRepository, TokenService, UserRepository,
};

use super::handlers::{
    CancelSubscriptionHandler, ChangePasswordHandler, CreateContentHandler,
    CreateSubscriptionHandler, DeleteAccountHandler, DeleteContentHandler,
    DeleteSubscriptionHandler, GetContentHandler, GetCurrentSubscriptionHandler,
    ListOwnedContentHandler, LoginHandler, RefreshTokenHandler, RegisterHandler,
    SweepExpiredSubscriptionsHandler, UpdateContentHandler, UpdateProfileHandler,
};
use super::AccessAuthorizer;

/// Port implementations the handlers are built from.
#[derive(Clone)]
pub struct Ports {
    pub users: Arc<dyn UserRepository>,
    pub subscriptions: Arc<dyn SubscriptionRepository>,
    pub contents: Arc<dyn ContentRepository>,
    pub payment: Arc<dyn PaymentGateway>,
    pub storage: Arc<dyn FileStorage>,
    pub tokens: Arc<dyn TokenService>,
    pub hasher: Arc<dyn PasswordHasher>,
    pub clock: Arc<dyn Clock>,
}

/// Shared application state.
#[derive(Clone)]
pub struct Services {
    /// Also the state for `auth_middleware`.
    pub tokens: Arc<dyn TokenService>,

    // Accounts
    pub register: Arc<RegisterHandler>,
    pub login: Arc<LoginHandler>,
    pub refresh_token: Arc<RefreshTokenHandler>,
    pub update_profile: Arc<UpdateProfileHandler>,
    pub change_password: Arc<ChangePasswordHandler>,
    pub delete_account: Arc<DeleteAccountHandler>,

    // Subscriptions
    pub create_subscription: Arc<CreateSubscriptionHandler>,
    pub cancel_subscription: Arc<CancelSubscriptionHandler>,
    pub current_subscription: Arc<GetCurrentSubscriptionHandler>,
    pub delete_subscription: Arc<DeleteSubscriptionHandler>,
    pub sweep: Arc<SweepExpiredSubscriptionsHandler>,

    // Content
    pub authorizer: Arc<AccessAuthorizer>,
    pub create_content: Arc<CreateContentHandler>,
    pub get_content: Arc<GetContentHandler>,
    pub update_content: Arc<UpdateContentHandler>,
    pub delete_content: Arc<DeleteContentHandler>,
    pub list_owned_content: Arc<ListOwnedContentHandler>,
}

impl Services {
    pub fn new(ports: Ports) -> Self {
        let Ports {
            users,
            subscriptions,
            contents,
            payment,
            storage,
            tokens,
            hasher,
            clock,
        } = ports;

        let current_subscription = Arc::new(GetCurrentSubscriptionHandler::new(
            subscriptions.clone(),
            clock.clone(),
        ));
        let authorizer = Arc::new(AccessAuthorizer::new(
            current_subscription.clone(),
            clock.clone(),
        ));

        Self {
            register: Arc::new(RegisterHandler::new(
                users.clone(),
                hasher.clone(),
                clock.clone(),
            )),
            login: Arc::new(LoginHandler::new(users.clone(), hasher.clone(), tokens.clone())),
            refresh_token: Arc::new(RefreshTokenHandler::new(tokens.clone())),
            update_profile: Arc::new(UpdateProfileHandler::new(users.clone(), clock.clone())),
            change_password: Arc::new(ChangePasswordHandler::new(
                users.clone(),
                hasher,
                clock.clone(),
            )),
            delete_account: Arc::new(DeleteAccountHandler::new(
                users,
                contents.clone(),
                storage.clone(),
            )),

            create_subscription: Arc::new(CreateSubscriptionHandler::new(
                subscriptions.clone(),
                payment.clone(),
                clock.clone(),
            )),
            cancel_subscription: Arc::new(CancelSubscriptionHandler::new(
                subscriptions.clone(),
                payment.clone(),
                clock.clone(),
            )),
            current_subscription,
            delete_subscription: Arc::new(DeleteSubscriptionHandler::new(subscriptions.clone())),
            sweep: Arc::new(SweepExpiredSubscriptionsHandler::new(
                subscriptions,
                payment,
                clock.clone(),
            )),

            get_content: Arc::new(GetContentHandler::new(contents.clone(), authorizer.clone())),
            authorizer,
            create_content: Arc::new(CreateContentHandler::new(
                contents.clone(),
                storage.clone(),
                clock.clone(),
            )),
            update_content: Arc::new(UpdateContentHandler::new(contents.clone(), clock)),
            delete_content: Arc::new(DeleteContentHandler::new(contents.clone(), storage)),
            list_owned_content: Arc::new(ListOwnedContentHandler::new(contents)),

            tokens,
        }
    }
}
