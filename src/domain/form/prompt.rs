//! Outbound prompt composition.
//!
//! The instruction template is a fixed content asset. The caller's request is
//! substituted into its single placeholder exactly once, so placeholder-like
//! text inside the request is never expanded again.

use crate::domain::foundation::ValidationError;

/// Marker replaced by the caller's request.
pub const USER_REQUEST_PLACEHOLDER: &str = "{user_request}";

/// Built-in instruction template for form generation.
pub const FORM_GENERATION_TEMPLATE: &str = r#"[ROLE & GOAL]
You convert natural-language form requirements into a single JSON object that follows the FormConfig schema below. Output only the raw JSON object: no explanation, no prose and no markdown. Any text outside the JSON object breaks the consuming system.

[SCHEMA DEFINITION]
```typescript
export type FormFieldType = "text" | "email" | "password" | "textarea" | "number" | "select" | "multiselect" | "checkbox" | "radio" | "date" | "datetime" | "file" | "toggle";
export type BackendDataType = "string" | "number" | "boolean" | "date" | "datetime" | "enum" | "object" | "array" | "json";
export interface StaticOption { value: string | number | boolean; label: string; description?: string; disabled?: boolean; }
export interface DynamicDataSource { type: "remote"; endpoint: string; method?: "GET" | "POST"; queryParam?: string; payloadTemplate?: Record<string, unknown>; headers?: Record<string, string>; debounceMs?: number; pagination?: { mode: "infinite" | "paged"; pageSize?: number; pageParam?: string; cursorParam?: string; labelKey: string; valueKey: string; hasMoreKey?: string; }; cacheTtlMs?: number; }
export interface FormFieldValidation { required?: boolean | string; minLength?: number; maxLength?: number; min?: number; max?: number; pattern?: string; email?: boolean; url?: boolean; sameAs?: string; customValidatorKey?: string; }
export interface VisibilityRule { field: string; operator: "equals" | "notEquals" | "in" | "notIn" | "exists" | "greaterThan" | "lessThan"; value?: unknown; }
export interface FormField { name: string; type: FormFieldType; label?: string; placeholder?: string; description?: string; helpText?: string; icon?: string; defaultValue?: unknown; disabled?: boolean; readOnly?: boolean; inputMode?: "text" | "email" | "numeric" | "tel" | "url"; autoComplete?: string; mask?: string; rows?: number; step?: number; min?: number | string; max?: number | string; maxSelections?: number; dataType?: BackendDataType; options?: StaticOption[]; dataSource?: DynamicDataSource; validation?: FormFieldValidation; visibleWhen?: VisibilityRule[]; layout?: { colSpan?: number; rowSpan?: number; order?: number; width?: "full" | "half" | "third"; }; attributes?: Record<string, string | number | boolean>; }
export interface FormStep { id: string; title?: string; description?: string; fields: string[]; nextLabel?: string; previousLabel?: string; progressLabel?: string; }
export interface SubmitAction { label: string; icon?: string; variant?: "primary" | "secondary" | "danger"; loadingText?: string; successMessage?: string; errorMessage?: string; confirmDialog?: { title: string; message: string; confirmLabel?: string; cancelLabel?: string; }; }
export interface FormConfig { title?: string; description?: string; endpoint: string; method?: "POST" | "PUT" | "PATCH"; headers?: Record<string, string>; fields: FormField[]; steps?: FormStep[]; submit: SubmitAction; onSuccessRedirect?: string; onSuccessMessage?: string; onErrorMessage?: string; draft?: { autosave?: boolean; intervalMs?: number }; }
```

[RULES & DEFAULTS]
1. Submission endpoints start with "/api", e.g. a contact form submits to "/api/contact".
2. The default "method" is "POST". Use "PUT" or "PATCH" only when the user talks about editing or updating.
3. Every form sends the header "Content-Type": "application/json".
4. Field "name" properties are camelCase.

[PHRASE MAPPINGS]
- 'comments', 'feedback', 'your message', 'long text' -> type "textarea"
- 'agree to terms' -> type "checkbox", validation { required: "You must agree to the terms." }
- 'password confirmation' -> name "confirmPassword", type "password", validation { sameAs: "password" }
- 'choose one' -> type "radio"
- 'choose many' -> type "checkbox" or "multiselect"
- 'upload a file' -> type "file"

[MISSING INFORMATION]
Make a sensible assumption when the request leaves something out. For option lists the user did not spell out, include two or three example options followed by {"label": "Other", "value": "other"}.

[IRRELEVANT REQUESTS]
If the request has nothing to do with building a form (a joke, the weather, general knowledge), do not produce a form. Respond with exactly this JSON object instead:
{
  "error": "IrrelevantPrompt",
  "message": "The request does not seem to be about creating a form. Please describe the form you would like to build."
}

[AUTHENTICATION FORMS]
- "login" / "sign in": endpoint "/api/auth/sign-in/email", method "POST", exactly two fields named "email" (type "email") and "password" (type "password"), submit label "Sign In", onSuccessRedirect "/dashboard".
- "signup" / "register" / "create account": endpoint "/api/auth/sign-up/email", method "POST", at least the fields "name" (type "text"), "email" (type "email") and "password" (type "password"), preferably also "confirmPassword", submit label "Create Account", onSuccessRedirect "/dashboard".

[EXAMPLE]
USER REQUEST: "A simple contact form with name, email and a longer message."
OUTPUT:
{
  "title": "Contact Us",
  "description": "Please fill out the form below to get in touch.",
  "endpoint": "/api/contact",
  "method": "POST",
  "headers": { "Content-Type": "application/json" },
  "fields": [
    { "name": "fullName", "type": "text", "label": "Full Name", "validation": { "required": true } },
    { "name": "email", "type": "email", "label": "Email Address", "validation": { "required": true, "email": true } },
    { "name": "message", "type": "textarea", "label": "Message", "rows": 5, "validation": { "required": true, "minLength": 10 } }
  ],
  "submit": { "label": "Send Message", "loadingText": "Sending..." }
}

[TASK]
Process the following request and output only the raw JSON object.

USER REQUEST: "{user_request}"
"#;

/// The caller's raw, non-empty request text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptRequest(String);

impl PromptRequest {
    /// Creates a request, rejecting an empty string.
    pub fn new(text: impl Into<String>) -> Result<Self, ValidationError> {
        let text = text.into();
        if text.is_empty() {
            return Err(ValidationError::empty_field("prompt"));
        }
        Ok(Self(text))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Substitutes `user_text` into the first placeholder of `template`.
pub fn compose(template: &str, user_text: &str) -> String {
    template.replacen(USER_REQUEST_PLACEHOLDER, user_text, 1)
}

/// Holds the instruction template used for every request.
#[derive(Debug, Clone)]
pub struct PromptComposer {
    template: String,
}

impl PromptComposer {
    /// Creates a composer for a custom template.
    ///
    /// The template must contain [`USER_REQUEST_PLACEHOLDER`].
    pub fn new(template: impl Into<String>) -> Result<Self, ValidationError> {
        let template = template.into();
        if !template.contains(USER_REQUEST_PLACEHOLDER) {
            return Err(ValidationError::invalid_format(
                "template",
                format!("missing {} placeholder", USER_REQUEST_PLACEHOLDER),
            ));
        }
        Ok(Self { template })
    }

    /// Builds the outbound prompt for `request`.
    pub fn compose(&self, request: &PromptRequest) -> String {
        compose(&self.template, request.as_str())
    }

    pub fn template(&self) -> &str {
        &self.template
    }
}

impl Default for PromptComposer {
    fn default() -> Self {
        Self {
            template: FORM_GENERATION_TEMPLATE.to_string(),
        }
    }
}
