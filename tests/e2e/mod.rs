// End-to-end tests for the Translate & Narrate HTTP API.
//
// Each test gets its own server bound to an ephemeral port, wired to
// wiremock fakes of the translation model endpoint and the Google speech
// endpoint, and its own temporary audio directory. Nothing is shared between
// tests, so they run in parallel.

mod helpers;
mod test_document;
mod test_page;
mod test_translate;
