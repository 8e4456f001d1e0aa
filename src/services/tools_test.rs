#[cfg(test)]
mod tools_tests {
    use serde_json::json;
    use std::sync::Arc;

    use crate::client_mock::{sample_slots, tool_call};
    use crate::services::slots::SlotStore;
    use crate::services::tools::{tool_declarations, SchedulerTools, BOOK_MEETING, CHECK_AVAILABILITY};

    fn setup_tools() -> (SchedulerTools, Arc<SlotStore>) {
        let store = Arc::new(SlotStore::new(sample_slots()));
        (SchedulerTools::new(Arc::clone(&store)), store)
    }

    #[test]
    fn test_declarations() {
        let tools = tool_declarations();
        assert_eq!(tools.len(), 1);

        let names: Vec<&str> = tools[0]
            .function_declarations
            .iter()
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec![CHECK_AVAILABILITY, BOOK_MEETING]);

        let book = &tools[0].function_declarations[1];
        assert_eq!(book.parameters["required"], json!(["slotId", "name"]));
        assert_eq!(book.parameters["properties"]["email"]["type"], "STRING");
    }

    #[test]
    fn test_check_availability() {
        let (tools, _) = setup_tools();

        let result = tools.execute(&tool_call("c1", CHECK_AVAILABILITY, json!({})));

        assert_eq!(result.call_id.as_deref(), Some("c1"));
        assert!(!result.is_error());
        assert_eq!(
            result.payload,
            json!({
                "slots": [
                    { "id": "1-0", "time": "Fri, Mar 30, 09:00 AM" },
                    { "id": "1-2", "time": "Fri, Mar 30, 01:00 PM" }
                ]
            })
        );
    }

    #[test]
    fn test_book_meeting() {
        let (tools, store) = setup_tools();

        let call = tool_call("c2", BOOK_MEETING, json!({ "slotId": "1-0", "name": "Ada" }));
        let result = tools.execute(&call);
        assert_eq!(result.payload, json!({ "success": true, "message": "Booking confirmed." }));

        let again = tools.execute(&call);
        assert_eq!(
            again.payload,
            json!({ "success": false, "message": "Slot no longer available." })
        );
        assert_eq!(store.list_available().len(), 1);
    }

    #[test]
    fn test_book_meeting_taken_slot() {
        let (tools, store) = setup_tools();

        let result = tools.execute(&tool_call(
            "c3",
            BOOK_MEETING,
            json!({ "slotId": "1-1", "name": "Ada", "email": "ada@example.com" }),
        ));

        assert_eq!(result.payload["success"], json!(false));
        assert!(!result.is_error());
        let ids: Vec<String> = store.list_available().into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["1-0", "1-2"]);
    }

    #[test]
    fn test_book_meeting_missing_slot_id() {
        let (tools, store) = setup_tools();

        let result = tools.execute(&tool_call("c4", BOOK_MEETING, json!({ "name": "Ada" })));

        assert!(result.is_error());
        assert!(result.payload["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid arguments"));
        assert_eq!(store.list_available().len(), 2);
    }

    #[test]
    fn test_unknown_function() {
        let (tools, _) = setup_tools();

        let result = tools.execute(&tool_call("c5", "cancelMeeting", json!({})));

        assert!(result.is_error());
        assert_eq!(result.payload, json!({ "error": "Unknown function" }));
        assert_eq!(result.name, "cancelMeeting");
    }

    #[test]
    fn test_function_response_shape() {
        let (tools, _) = setup_tools();

        let response = tools
            .execute(&tool_call("c6", "nope", json!({})))
            .into_function_response();

        assert_eq!(response.id.as_deref(), Some("c6"));
        assert_eq!(response.name, "nope");
        assert_eq!(response.response, json!({ "result": { "error": "Unknown function" } }));
    }
}
