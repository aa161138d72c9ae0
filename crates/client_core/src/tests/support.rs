//! In-memory [`RecordClient`] for controller tests.

use std::sync::{
    atomic::{AtomicBool, AtomicI64, Ordering},
    Mutex,
};

use async_trait::async_trait;
use shared::{
    domain::{EmployeeRecord, RecordId},
    protocol::{EmployeeUpdate, NewEmployee},
};
use tokio::sync::Notify;

use crate::{
    form::EmployeeForm,
    record_client::{RecordClient, RecordClientError},
};

/// Parks a call until the test releases it.
#[derive(Default)]
pub(crate) struct Gate {
    hold: AtomicBool,
    entered: Notify,
    release: Notify,
}

impl Gate {
    pub(crate) fn hold(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    pub(crate) async fn wait_entered(&self) {
        self.entered.notified().await;
    }

    pub(crate) fn release(&self) {
        self.hold.store(false, Ordering::SeqCst);
        self.release.notify_one();
    }

    async fn pass(&self) {
        if self.hold.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.release.notified().await;
        }
    }
}

#[derive(Default)]
pub(crate) struct FakeRecordClient {
    records: Mutex<Vec<EmployeeRecord>>,
    next_id: AtomicI64,
    calls: Mutex<Vec<&'static str>>,
    pub(crate) fail_list: AtomicBool,
    pub(crate) fail_search: AtomicBool,
    pub(crate) fail_create: AtomicBool,
    pub(crate) fail_update: AtomicBool,
    pub(crate) fail_delete: AtomicBool,
    pub(crate) search_gate: Gate,
    pub(crate) delete_gate: Gate,
}

impl FakeRecordClient {
    pub(crate) fn with_records(records: Vec<EmployeeRecord>) -> Self {
        let next_id = records.iter().map(|r| r.id.0).max().unwrap_or(0) + 1;
        Self {
            records: Mutex::new(records),
            next_id: AtomicI64::new(next_id),
            ..Self::default()
        }
    }

    pub(crate) fn fail(flag: &AtomicBool) {
        flag.store(true, Ordering::SeqCst);
    }

    pub(crate) fn records(&self) -> Vec<EmployeeRecord> {
        self.records.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self, name: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|call| **call == name)
            .count()
    }

    fn record_call(&self, name: &'static str) {
        self.calls.lock().unwrap().push(name);
    }

    fn transport_failure(flag: &AtomicBool) -> Result<(), RecordClientError> {
        if flag.load(Ordering::SeqCst) {
            Err(RecordClientError::Transport("connection refused".into()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl RecordClient for FakeRecordClient {
    async fn list(&self) -> Result<Vec<EmployeeRecord>, RecordClientError> {
        self.record_call("list");
        Self::transport_failure(&self.fail_list)?;
        Ok(self.records())
    }

    async fn search_by_id(&self, employee_id: &str) -> Result<EmployeeRecord, RecordClientError> {
        self.record_call("search");
        self.search_gate.pass().await;
        Self::transport_failure(&self.fail_search)?;
        self.records()
            .into_iter()
            .find(|record| record.employee_id == employee_id)
            .ok_or_else(|| RecordClientError::NotFound(format!("employee '{employee_id}'")))
    }

    async fn create(&self, employee: &NewEmployee) -> Result<EmployeeRecord, RecordClientError> {
        self.record_call("create");
        Self::transport_failure(&self.fail_create)?;
        let id = RecordId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let record = employee.clone().into_record(id);
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn update_by_id(
        &self,
        id: RecordId,
        update: &EmployeeUpdate,
    ) -> Result<EmployeeRecord, RecordClientError> {
        self.record_call("update");
        Self::transport_failure(&self.fail_update)?;
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|record| record.id == id)
            .ok_or_else(|| RecordClientError::NotFound(format!("record {id}")))?;
        update.apply_to(record);
        Ok(record.clone())
    }

    async fn delete_by_id(&self, id: RecordId) -> Result<(), RecordClientError> {
        self.record_call("delete");
        self.delete_gate.pass().await;
        Self::transport_failure(&self.fail_delete)?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|record| record.id != id);
        if records.len() == before {
            return Err(RecordClientError::NotFound(format!("record {id}")));
        }
        Ok(())
    }
}

pub(crate) fn employee(id: i64, employee_id: &str, name: &str) -> EmployeeRecord {
    EmployeeRecord {
        id: RecordId(id),
        employee_id: employee_id.into(),
        name: name.into(),
        department: "Engineering".into(),
        designation: "Software Engineer".into(),
        primary_skill: "Rust".into(),
        secondary_skill: "SQL".into(),
        skill_rating: 8,
        years_of_experience: 5,
        email: format!("{}@example.com", name.to_ascii_lowercase()),
    }
}

pub(crate) fn filled_form(employee_id: &str, name: &str) -> EmployeeForm {
    EmployeeForm {
        employee_id: employee_id.into(),
        name: name.into(),
        department: "Marketing".into(),
        designation: "Analyst".into(),
        primary_skill: "Excel".into(),
        secondary_skill: String::new(),
        skill_rating: "7".into(),
        years_of_experience: "3".into(),
        email: "ana@example.com".into(),
    }
}
