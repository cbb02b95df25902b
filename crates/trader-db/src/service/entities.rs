//! Account and order records.

use super::*;
use crate::ports::inbound::EntityStoreApi;
use trader_telemetry::{metric_inc, ACCOUNTS_ADDED, ORDERS_SUBMITTED};
use trader_types::{
    apply_account_modifiers, apply_order_modifiers, Account, AccountModifier, Nonce, Order,
    OrderModifier, PublicKey,
};

impl<KV, C> EntityStoreApi for TraderDb<KV, C>
where
    KV: KeyValueStore,
    C: RecordCodec,
{
    fn get_order(&self, nonce: &Nonce) -> Result<Order, DbError> {
        self.load_order(nonce)
    }

    fn get_orders(&self) -> Result<Vec<Order>, DbError> {
        self.read_all(KeyPrefix::Order)
    }

    fn submit_order(&mut self, order: &Order) -> Result<(), DbError> {
        let nonce = order.nonce();
        let key = KeyPrefix::order_key(&nonce);
        if self.kv_store.exists(&key)? {
            return Err(DbError::OrderExists { nonce });
        }

        let op = self.put_op(key, order)?;
        self.write(vec![op])?;

        metric_inc!(ORDERS_SUBMITTED);
        tracing::debug!(
            nonce = %nonce,
            order_type = ?order.order_type(),
            units = %order.kit().units,
            "[trader-db] Order stored"
        );
        Ok(())
    }

    fn update_order(&mut self, nonce: &Nonce, modifiers: &[OrderModifier]) -> Result<(), DbError> {
        let mut order = self.load_order(nonce)?;
        apply_order_modifiers(&mut order, modifiers);

        let op = self.put_op(KeyPrefix::order_key(nonce), &order)?;
        self.write(vec![op])?;

        tracing::debug!(nonce = %nonce, state = %order.kit().state, "[trader-db] Order updated");
        Ok(())
    }

    fn account(&self, trader_key: &PublicKey) -> Result<Account, DbError> {
        self.load_account(trader_key)
    }

    fn accounts(&self) -> Result<Vec<Account>, DbError> {
        self.read_all(KeyPrefix::Account)
    }

    fn add_account(&mut self, account: &Account) -> Result<(), DbError> {
        let trader_key = *account.trader_pub_key();
        let key = KeyPrefix::account_key(&trader_key);
        if self.kv_store.exists(&key)? {
            return Err(DbError::AccountExists { trader_key });
        }

        let op = self.put_op(key, account)?;
        self.write(vec![op])?;

        metric_inc!(ACCOUNTS_ADDED);
        tracing::debug!(
            trader_key = %hex::encode(trader_key),
            value = account.value,
            state = %account.state,
            "[trader-db] Account stored"
        );
        Ok(())
    }

    fn update_account(
        &mut self,
        trader_key: &PublicKey,
        modifiers: &[AccountModifier],
    ) -> Result<(), DbError> {
        let mut account = self.load_account(trader_key)?;
        apply_account_modifiers(&mut account, modifiers);

        let op = self.put_op(KeyPrefix::account_key(trader_key), &account)?;
        self.write(vec![op])?;

        tracing::debug!(
            trader_key = %hex::encode(trader_key),
            state = %account.state,
            "[trader-db] Account updated"
        );
        Ok(())
    }
}
