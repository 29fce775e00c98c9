use std::cell::{Cell, RefCell};
use std::rc::Rc;

use formwix::{
    BoxError, FieldValue, FormConfig, FormController, FormStore, FormValues, MemoryStore,
    SubmitOutcome, SubmitState,
};

fn signup() -> FormConfig {
    FormConfig::from_json_str(
        r#"{
            "fields": [
                { "type": "text", "name": "username", "label": "Username",
                  "validation": { "required": { "value": true } } },
                { "type": "password", "name": "password", "label": "Password",
                  "validation": { "required": { "value": true }, "minLength": { "value": 8 } } },
                { "type": "password", "name": "confirmPassword",
                  "label": "Confirm password",
                  "validation": { "matchField": { "field": "password" } } },
                { "type": "multiselect", "name": "topics", "label": "Topics",
                  "options": [{ "label": "Rust", "value": "rust" }, { "label": "Go", "value": "go" }],
                  "validation": { "required": { "value": true } } },
                { "type": "tel", "name": "phone", "label": "Phone" },
                { "type": "checkbox", "name": "newsletter", "label": "Newsletter" }
            ],
            "defaultValues": { "newsletter": true, "topics": [] }
        }"#,
    )
    .unwrap()
}

fn fill(controller: &FormController) {
    controller.set_value("username", "ada");
    controller.set_value("password", "Abc12345!");
    controller.set_value("confirmPassword", "Abc12345!");
    controller.set_value("topics", vec!["rust"]);
}

fn counting(calls: &Rc<Cell<u32>>) -> FormController {
    let counter = Rc::clone(calls);
    FormController::with_memory_store(signup(), move |_values, _utils| {
        counter.set(counter.get() + 1);
        async { Ok(()) }
    })
    .unwrap()
}

#[tokio::test]
async fn test_required_field_blocks_submission() {
    let calls = Rc::new(Cell::new(0));
    let controller = counting(&calls);
    fill(&controller);
    controller.set_value("username", "");

    let outcome = controller.submit().await.unwrap();
    assert!(matches!(&outcome, SubmitOutcome::Rejected(errors) if errors.contains("username")));
    assert_eq!(calls.get(), 0);
}

#[tokio::test]
async fn test_password_mismatch_keyed_to_confirmation() {
    let calls = Rc::new(Cell::new(0));
    let controller = counting(&calls);
    fill(&controller);
    controller.set_value("confirmPassword", "different");

    let outcome = controller.submit().await.unwrap();
    let SubmitOutcome::Rejected(errors) = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
    assert!(!errors.contains("password"));
    assert_eq!(controller.errors().get("confirmPassword"), Some("Passwords do not match"));
    assert_eq!(calls.get(), 0);

    controller.set_value("confirmPassword", "Abc12345!");
    assert_eq!(controller.submit().await.unwrap(), SubmitOutcome::Submitted);
    assert_eq!(calls.get(), 1);
}

#[tokio::test]
async fn test_required_multiselect_needs_a_selection() {
    let calls = Rc::new(Cell::new(0));
    let controller = counting(&calls);
    fill(&controller);
    controller.set_value("topics", FieldValue::List(vec![]));

    let outcome = controller.submit().await.unwrap();
    assert!(matches!(&outcome, SubmitOutcome::Rejected(errors) if errors.contains("topics")));
    assert_eq!(calls.get(), 0);
}

#[tokio::test]
async fn test_cross_field_errors_do_not_override_schema_errors() {
    let calls = Rc::new(Cell::new(0));
    let controller = counting(&calls);
    fill(&controller);
    controller.set_value("topics", FieldValue::List(vec![]));
    controller.set_value("username", "");

    let SubmitOutcome::Rejected(errors) = controller.submit().await.unwrap() else {
        panic!("expected rejection");
    };
    assert_eq!(errors.get("topics"), Some("Topics is required"));
    assert_eq!(errors.get("username"), Some("Username is required"));
}

#[tokio::test]
async fn test_handler_receives_normalised_values() {
    let seen = Rc::new(RefCell::new(FormValues::new()));
    let sink = Rc::clone(&seen);
    let controller = FormController::with_memory_store(signup(), move |values, _utils| {
        *sink.borrow_mut() = values;
        async { Ok(()) }
    })
    .unwrap();
    fill(&controller);
    controller.set_value("phone", "+1 (555) 123-4567");
    controller.set_value("unknown", "dropped");

    assert_eq!(controller.submit().await.unwrap(), SubmitOutcome::Submitted);
    let values = seen.borrow();
    assert_eq!(values.get("phone"), Some(&FieldValue::from("15551234567")));
    assert_eq!(values.get("newsletter"), Some(&FieldValue::Bool(true)));
    assert!(!values.contains("unknown"));
}

#[tokio::test]
async fn test_resubmitting_while_submitting_is_a_no_op() {
    let calls = Rc::new(Cell::new(0));
    let counter = Rc::clone(&calls);
    let controller = FormController::with_memory_store(signup(), move |_values, _utils| {
        counter.set(counter.get() + 1);
        async {
            tokio::task::yield_now().await;
            Ok(())
        }
    })
    .unwrap();
    fill(&controller);

    let (first, second) = tokio::join!(controller.submit(), controller.submit());
    assert_eq!(first.unwrap(), SubmitOutcome::Submitted);
    assert_eq!(second.unwrap(), SubmitOutcome::Busy);
    assert_eq!(calls.get(), 1);
    assert_eq!(controller.state(), SubmitState::Idle);

    assert_eq!(controller.submit().await.unwrap(), SubmitOutcome::Submitted);
    assert_eq!(calls.get(), 2);
}

#[tokio::test]
async fn test_state_is_submitting_inside_handler() {
    let observed = Rc::new(Cell::new(SubmitState::Idle));
    let controller = Rc::new_cyclic(|weak: &std::rc::Weak<FormController>| {
        let weak = weak.clone();
        let observed = Rc::clone(&observed);
        FormController::with_memory_store(signup(), move |_values, _utils| {
            if let Some(controller) = weak.upgrade() {
                observed.set(controller.state());
            }
            async { Ok(()) }
        })
        .unwrap()
    });
    fill(&controller);

    controller.submit().await.unwrap();
    assert_eq!(observed.get(), SubmitState::Submitting);
    assert_eq!(controller.state(), SubmitState::Idle);
}

#[tokio::test]
async fn test_reset_from_handler() {
    let controller = FormController::with_memory_store(signup(), |_values, utils| {
        utils.reset.reset();
        async { Ok::<(), BoxError>(()) }
    })
    .unwrap();
    fill(&controller);
    controller.set_value("phone", "5551234567");

    assert_eq!(controller.submit().await.unwrap(), SubmitOutcome::Submitted);
    let store = controller.store();
    let store = store.borrow();
    assert_eq!(store.value("username"), Some(&FieldValue::from("")));
    assert_eq!(store.value("topics"), Some(&FieldValue::List(vec![])));
    assert_eq!(store.value("newsletter"), Some(&FieldValue::from("")));
}

#[tokio::test]
async fn test_reset_clears_errors() {
    let calls = Rc::new(Cell::new(0));
    let controller = counting(&calls);

    let outcome = controller.submit().await.unwrap();
    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert!(!controller.errors().is_empty());

    controller.reset();
    assert!(controller.errors().is_empty());
    let store = controller.store();
    for field in &controller.config().fields {
        assert_eq!(
            store.borrow().value(&field.name),
            Some(&field.kind.empty_value())
        );
    }
}

#[tokio::test]
async fn test_shared_store_receives_live_errors() {
    let config = signup();
    let store = Rc::new(RefCell::new(MemoryStore::from_config(&config)));
    let shared: Rc<RefCell<dyn FormStore>> = Rc::clone(&store) as _;
    let controller =
        FormController::new(config, shared, |_values, _utils| async { Ok(()) }).unwrap();

    controller.submit().await.unwrap();
    assert!(store.borrow().is_submitted());
    assert_eq!(store.borrow().error("username"), Some("Username is required"));

    // After a submission attempt every change re-validates.
    store.borrow_mut().set_value("username", FieldValue::from("ada"));
    assert!(store.borrow().error("username").is_none());
}
