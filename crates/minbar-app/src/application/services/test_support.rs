//! Shared fakes for the service tests: a scriptable gateway and record
//! builders.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};

use minbar_domain::filter::DateRange;
use minbar_domain::gateway::{
    ApiGateway, AuthResponse, Credentials, MethodStatRow, PasswordChange, ProfileUpdate,
    Registration, TypeStatRow,
};
use minbar_domain::member::{MemberDraft, MemberRecord};
use minbar_domain::payment::{Amount, PaymentMethod, PaymentRecord, PaymentType};
use minbar_domain::shared::DomainError;

pub fn test_payment(id: i64, name: &str, amount: f64, created_at: &str) -> PaymentRecord {
    PaymentRecord {
        id,
        amount: Amount::new(amount),
        payment_type: PaymentType::MemberFee,
        payment_method: PaymentMethod::Cashmatic,
        member_id: None,
        member_name: Some(name.to_string()),
        created_at: created_at.parse().unwrap(),
        transaction_id: None,
        rent_start_date: None,
        rent_end_date: None,
    }
}

pub fn range() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 8, 31).unwrap(),
    )
    .unwrap()
}

pub fn fixed_now() -> DateTime<FixedOffset> {
    Utc.with_ymd_and_hms(2026, 8, 7, 12, 0, 0)
        .unwrap()
        .fixed_offset()
}

pub fn serving_gateway(payments: Vec<PaymentRecord>) -> Arc<ScriptedGateway> {
    Arc::new(ScriptedGateway::serving(payments))
}

/// Gateway whose payments() responses are scripted per call, each with an
/// optional delay, to orchestrate overlapping fetch cycles.
pub struct ScriptedGateway {
    payments: Mutex<Vec<Vec<PaymentRecord>>>,
    delays_ms: Mutex<Vec<u64>>,
    calls: AtomicU32,
    fail: bool,
}

impl ScriptedGateway {
    pub fn serving(payments: Vec<PaymentRecord>) -> Self {
        Self {
            payments: Mutex::new(vec![payments]),
            delays_ms: Mutex::new(vec![0]),
            calls: AtomicU32::new(0),
            fail: false,
        }
    }

    pub fn scripted(responses: Vec<(u64, Vec<PaymentRecord>)>) -> Self {
        let (delays, payments): (Vec<u64>, Vec<Vec<PaymentRecord>>) =
            responses.into_iter().unzip();
        Self {
            payments: Mutex::new(payments),
            delays_ms: Mutex::new(delays),
            calls: AtomicU32::new(0),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            payments: Mutex::new(Vec::new()),
            delays_ms: Mutex::new(Vec::new()),
            calls: AtomicU32::new(0),
            fail: true,
        }
    }

    pub fn call_count(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ApiGateway for ScriptedGateway {
    fn set_auth_token(&self, _token: Option<String>) {}

    async fn payments(&self) -> Result<Vec<PaymentRecord>, DomainError> {
        if self.fail {
            self.calls.fetch_add(1, Ordering::SeqCst);
            return Err(DomainError::Network("connection refused".to_string()));
        }

        let call = self.calls.fetch_add(1, Ordering::SeqCst) as usize;
        let (delay, data) = {
            let delays = self.delays_ms.lock().unwrap();
            let payments = self.payments.lock().unwrap();
            // past the end of the script, keep serving the last response
            let idx = call.min(payments.len() - 1);
            (delays[idx.min(delays.len() - 1)], payments[idx].clone())
        };

        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(data)
    }

    async fn payment_by_id(&self, _id: i64) -> Result<Option<PaymentRecord>, DomainError> {
        Ok(None)
    }

    async fn payments_for_member(
        &self,
        _member_id: i64,
    ) -> Result<Vec<PaymentRecord>, DomainError> {
        Ok(Vec::new())
    }

    async fn payment_stats_by_type(
        &self,
        _range: &DateRange,
    ) -> Result<Vec<TypeStatRow>, DomainError> {
        Ok(Vec::new())
    }

    async fn payment_stats_by_method(
        &self,
        _range: &DateRange,
    ) -> Result<Vec<MethodStatRow>, DomainError> {
        Ok(Vec::new())
    }

    async fn members(&self) -> Result<Vec<MemberRecord>, DomainError> {
        Ok(Vec::new())
    }

    async fn member_by_id(&self, _id: i64) -> Result<Option<MemberRecord>, DomainError> {
        Ok(None)
    }

    async fn search_members(&self, _query: &str) -> Result<Vec<MemberRecord>, DomainError> {
        Ok(Vec::new())
    }

    async fn next_member_code(&self) -> Result<String, DomainError> {
        Ok("0001".to_string())
    }

    async fn create_member(&self, _draft: &MemberDraft) -> Result<(), DomainError> {
        Ok(())
    }

    async fn update_member(&self, _id: i64, _draft: &MemberDraft) -> Result<(), DomainError> {
        Ok(())
    }

    async fn delete_member(&self, _id: i64) -> Result<(), DomainError> {
        Ok(())
    }

    async fn login(&self, _c: &Credentials) -> Result<AuthResponse, DomainError> {
        unimplemented!("not used in these tests")
    }

    async fn register(&self, _r: &Registration) -> Result<AuthResponse, DomainError> {
        unimplemented!("not used in these tests")
    }

    async fn update_profile(&self, _u: &ProfileUpdate) -> Result<AuthResponse, DomainError> {
        unimplemented!("not used in these tests")
    }

    async fn change_password(&self, _c: &PasswordChange) -> Result<(), DomainError> {
        unimplemented!("not used in these tests")
    }
}
