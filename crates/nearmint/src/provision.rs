//! The register → redeem → verify sequence for one account id.

use crate::{
    dispatch::Dispatcher,
    error::{Error, Result},
    identifier::AccountId,
    keypair::Keypair,
    record::{AccountRecord, AccountStatus},
    relayer::RelayerClient,
    sleep::{SleepProvider, TokioSleep},
    transport::Transport,
};
use chrono::Utc;

#[cfg(feature = "tracing")]
use tracing::{info, instrument};

/// Owns the two network clients a provisioning attempt needs: the query
/// dispatcher (availability and verification) and the relayer.
pub struct Provisioner<Q, R, S = TokioSleep> {
    query: Dispatcher<Q, S>,
    relayer: RelayerClient<R, S>,
}

impl<Q, R, S> Provisioner<Q, R, S>
where
    Q: Transport,
    R: Transport,
    S: SleepProvider,
{
    pub fn new(query: Dispatcher<Q, S>, relayer: RelayerClient<R, S>) -> Self {
        Self { query, relayer }
    }

    pub fn query(&self) -> &Dispatcher<Q, S> {
        &self.query
    }

    pub fn relayer(&self) -> &RelayerClient<R, S> {
        &self.relayer
    }

    /// Registers `account`, redeems `referral_code` for it and checks that
    /// it is visible on-chain.
    ///
    /// The steps run strictly in that order and none is retried here. A
    /// missing referral code skips redemption. An account that is not yet
    /// visible is reported as [`AccountStatus::Pending`], not as an error.
    ///
    /// # Errors
    ///
    /// - Registration: [`Error::RegistrationRejected`] or a dispatch error.
    ///   Nothing else is attempted.
    /// - Redemption: [`Error::RedemptionRejected`] or a dispatch error.
    /// - Verification: [`Error::VerificationFailed`] if the lookup itself
    ///   could not be made.
    #[cfg_attr(feature = "tracing", instrument(level = "info", skip_all, fields(account = %account)))]
    pub async fn provision(
        &self,
        account: AccountId,
        referral_code: Option<&str>,
    ) -> Result<AccountRecord> {
        let keypair = Keypair::generate();
        let relayer_token = self
            .relayer
            .create_account(&account, &keypair.public_key)
            .await?;
        let created_at = Utc::now();

        #[cfg(feature = "tracing")]
        info!("relayer accepted account");

        if let Some(code) = referral_code {
            self.relayer.redeem(code, &account).await?;

            #[cfg(feature = "tracing")]
            info!(code, "referral redeemed");
        }

        let verified = self
            .query
            .view_account(&account)
            .await
            .map_err(|e| Error::VerificationFailed {
                identifier: account.to_string(),
                source: Box::new(e),
            })?
            .is_some();

        #[cfg(feature = "tracing")]
        info!(verified, "provisioning finished");

        Ok(AccountRecord {
            identifier: account,
            public_key: keypair.public_key,
            secret_key: keypair.secret_key,
            relayer_token,
            referral_code: referral_code.map(str::to_string),
            verified,
            status: AccountStatus::from_verified(verified),
            created_at,
        })
    }
}
