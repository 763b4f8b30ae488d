//! Rendering snapshot tests
//!
//! Inline snapshots of complete markup for small forms.

use formwork_forms::{
	ConfigMap, CsrfTokenField, Fieldset, FormServices, Renderer, SelectOptions, WrapperTag,
	attrs,
};
use insta::assert_snapshot;
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

#[rstest]
fn test_snapshot_minimal_form() {
	let config = attrs(json!({
		"auto_id": false,
		"form_template": "{open}{fields}{close}",
		"field_template": "{label}{required} {field}"
	}));
	let mut fieldset = Fieldset::new("contact", config);
	fieldset
		.add("name", "Name", attrs(json!({"required": true})))
		.unwrap();

	let html = fieldset.build(Some("send")).unwrap();

	assert_snapshot!(html.trim_end(), @r#"
	<form action="/send" accept-charset="utf-8" method="post">
	<label id="label_name">Name</label>* <input type="text" required="required" name="name" value="" />
	</form>
	"#);
}

#[rstest]
fn test_snapshot_open_with_hidden_and_csrf() {
	let config = ConfigMap::new();
	let services = FormServices::default().with_csrf(CsrfTokenField::new("abc"));
	let renderer = Renderer::new(&config, &services);

	let html = renderer
		.open(&ConfigMap::new(), &attrs(json!({"step": "2"})))
		.unwrap();

	assert_snapshot!(html, @r#"
	<form action="/" accept-charset="utf-8" method="post">
	<input name="step" value="2" type="hidden" id="form_step" />
	<input type="hidden" name="_token" value="abc" />
	"#);
}

#[rstest]
fn test_grouped_select_markup() {
	let config = attrs(json!({"auto_id": false}));
	let services = FormServices::default();
	let renderer = Renderer::new(&config, &services);
	let options = SelectOptions::from_value(&json!({
		"a": "Apple",
		"fruit": {"b": "Banana"}
	}));

	let html = renderer
		.select("pick", &json!("b"), Some(&options), &ConfigMap::new())
		.unwrap();

	assert_eq!(
		html,
		"<select name=\"pick\">\n\
		 \t<option value=\"a\" style=\"text-indent: 0px;\">Apple</option>\n\
		 \t<optgroup label=\"fruit\" style=\"text-indent: 0px;\">\n\
		 \t\t<option value=\"b\" style=\"text-indent: 10px;\" selected=\"selected\">Banana</option>\n\
		 \t</optgroup>\n\
		 </select>"
	);
}

#[rstest]
fn test_snapshot_custom_wrapper() {
	let config = attrs(json!({
		"auto_id": false,
		"div_template": "{open}{fields}{close}",
		"field_template": "{field}",
		"form_attributes": {"class": "panel"}
	}));
	let mut fieldset = Fieldset::with_services("panel", config, Arc::new(FormServices::default()));
	fieldset.set_wrapper_tag(Some(WrapperTag::Custom("div".to_string())));
	fieldset
		.add("note", "", attrs(json!({"type": "textarea", "value": "hi"})))
		.unwrap();

	let html = fieldset.build(Some("ignored")).unwrap();

	assert_snapshot!(html, @r#"
	<div class="panel"><textarea name="note">hi</textarea>
	</div>
	"#);
}
