//! The reducer: applies events to state and spawns flow tasks.
//!
//! Keyboard handling is per screen. Submissions set the form to
//! `Submitting`, start a latest-only request and hand the work to a
//! spawned task; the task's navigations and result come back through the
//! inbox and are applied here.

use std::sync::Arc;

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::flows::{AuthFlow, user_message};
use crate::geo::LocationProvider;
use crate::router::{Screen, edge_allowed};
use crate::tui::Ctx;
use crate::tui::events::{ChannelNavigator, UiEvent};
use crate::tui::state::{AppState, ScreenState, SubmitState};

/// Applies one event to the state.
pub fn handle(state: &mut AppState, ctx: &Ctx, event: UiEvent) {
    match event {
        UiEvent::Terminal(CrosstermEvent::Key(key)) if key.kind == KeyEventKind::Press => {
            handle_key(state, ctx, key);
        }
        UiEvent::Terminal(_) => {}
        UiEvent::BootstrapDone(route) => enter_screen(state, ctx, route),
        UiEvent::Navigate(to) => apply_navigate(state, ctx, to),
        UiEvent::ResetTo(to) => enter_screen(state, ctx, to),
        UiEvent::Flow { request, result } => {
            if !state.requests.finish_if_active(request) {
                tracing::debug!("stale flow result dropped");
                return;
            }
            if let Err(err) = result
                && let Some(form) = state.screen.form_mut()
            {
                form.submit = SubmitState::Failed(err.message);
            }
        }
        UiEvent::Categories { request, result } => {
            if !state.requests.finish_if_active(request) {
                tracing::debug!("stale category result dropped");
                return;
            }
            if let ScreenState::Home(home) = &mut state.screen {
                home.loading = false;
                match result {
                    Ok(categories) => {
                        home.categories = categories;
                        home.error = None;
                    }
                    Err(message) => home.error = Some(message),
                }
            }
        }
    }
}

// ============================================================================
// Navigation
// ============================================================================

/// Follows an edge, refusing transitions the graph doesn't have.
fn apply_navigate(state: &mut AppState, ctx: &Ctx, to: Screen) {
    let Some(from) = state.screen.id() else {
        tracing::warn!(to = ?to.id(), "navigation before bootstrap ignored");
        return;
    };
    if !edge_allowed(from, to.id()) {
        tracing::warn!(?from, to = ?to.id(), "off-graph navigation ignored");
        return;
    }
    enter_screen(state, ctx, to);
}

/// Switches to a screen, invalidating any in-flight request.
fn enter_screen(state: &mut AppState, ctx: &Ctx, to: Screen) {
    state.requests.cancel();
    let is_home = matches!(to, Screen::Home);
    state.screen = ScreenState::enter(to, ctx.location.current());
    if is_home {
        spawn_categories_fetch(state, ctx);
    }
}

// ============================================================================
// Keyboard
// ============================================================================

fn handle_key(state: &mut AppState, ctx: &Ctx, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        state.should_quit = true;
        return;
    }

    match &mut state.screen {
        ScreenState::Splash => {}
        ScreenState::Login(_) => handle_login_key(state, ctx, key),
        ScreenState::Signup(_) => handle_signup_key(state, ctx, key),
        ScreenState::AdditionalInfo(_) => handle_additional_info_key(state, ctx, key),
        ScreenState::Reset(_) => handle_reset_key(state, ctx, key),
        ScreenState::ResetOtp { .. } => handle_reset_otp_key(state, ctx, key),
        ScreenState::Home(_) => handle_home_key(state, ctx, key),
    }
}

/// Shared text-editing keys.
fn handle_form_key(state: &mut AppState, key: KeyEvent) {
    let Some(form) = state.screen.form_mut() else {
        return;
    };

    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => form.insert(c),
        _ => {}
    }
}

fn submitting(state: &mut AppState) -> bool {
    state
        .screen
        .form_mut()
        .is_some_and(|form| form.submit.is_submitting())
}

fn handle_login_key(state: &mut AppState, ctx: &Ctx, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('n') => return apply_navigate(state, ctx, Screen::Signup),
            KeyCode::Char('r') => return apply_navigate(state, ctx, Screen::Reset),
            _ => {}
        }
    }

    match key.code {
        KeyCode::Esc => state.should_quit = true,
        KeyCode::Enter if !submitting(state) => submit_login(state, ctx),
        _ => {
            handle_form_key(state, key);
        }
    }
}

fn handle_signup_key(state: &mut AppState, ctx: &Ctx, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
        return apply_navigate(state, ctx, Screen::Login);
    }

    match key.code {
        KeyCode::Esc => apply_navigate(state, ctx, Screen::Login),
        KeyCode::Enter if !submitting(state) => submit_signup(state, ctx),
        _ => {
            handle_form_key(state, key);
        }
    }
}

fn handle_additional_info_key(state: &mut AppState, ctx: &Ctx, key: KeyEvent) {
    // Profile completion cannot be backed out of; the pending signup has
    // no other way forward.
    if key.code == KeyCode::Enter {
        if !submitting(state) {
            submit_profile(state, ctx);
        }
        return;
    }

    let ScreenState::AdditionalInfo(info) = &mut state.screen else {
        return;
    };

    match key.code {
        KeyCode::Tab | KeyCode::Down => {
            if info.picker_focused {
                info.picker_focused = false;
                info.form.focus = 0;
            } else if info.form.focus + 1 == info.form.fields.len() {
                info.picker_focused = true;
            } else {
                info.form.focus_next();
            }
        }
        KeyCode::BackTab | KeyCode::Up => {
            if info.picker_focused {
                info.picker_focused = false;
                info.form.focus = info.form.fields.len() - 1;
            } else if info.form.focus == 0 {
                info.picker_focused = true;
            } else {
                info.form.focus_prev();
            }
        }
        KeyCode::Left if info.picker_focused => info.cycle_city(false),
        KeyCode::Right if info.picker_focused => info.cycle_city(true),
        KeyCode::Backspace if !info.picker_focused => info.form.backspace(),
        KeyCode::Char(c)
            if !info.picker_focused && !key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            info.form.insert(c);
        }
        _ => {}
    }
}

fn handle_reset_key(state: &mut AppState, ctx: &Ctx, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
        return apply_navigate(state, ctx, Screen::Login);
    }

    match key.code {
        KeyCode::Esc => apply_navigate(state, ctx, Screen::Login),
        KeyCode::Enter if !submitting(state) => submit_reset_request(state, ctx),
        _ => {
            handle_form_key(state, key);
        }
    }
}

fn handle_reset_otp_key(state: &mut AppState, ctx: &Ctx, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => apply_navigate(state, ctx, Screen::Login),
        KeyCode::Enter if !submitting(state) => submit_reset_confirm(state, ctx),
        _ => {
            handle_form_key(state, key);
        }
    }
}

fn handle_home_key(state: &mut AppState, ctx: &Ctx, key: KeyEvent) {
    let (confirming, loading) = match &state.screen {
        ScreenState::Home(home) => (home.confirm_logout, home.loading),
        _ => return,
    };

    if confirming {
        match key.code {
            KeyCode::Char('y' | 'Y') | KeyCode::Enter => {
                set_confirm_logout(state, false);
                logout(state, ctx);
            }
            KeyCode::Char('n' | 'N') | KeyCode::Esc => set_confirm_logout(state, false),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('l') => set_confirm_logout(state, true),
        KeyCode::Char('r') if !loading => refresh_categories(state, ctx),
        KeyCode::Char('q') | KeyCode::Esc => state.should_quit = true,
        _ => {}
    }
}

fn set_confirm_logout(state: &mut AppState, confirming: bool) {
    if let ScreenState::Home(home) = &mut state.screen {
        home.confirm_logout = confirming;
    }
}

// ============================================================================
// Effects
// ============================================================================

fn logout(state: &mut AppState, ctx: &Ctx) {
    let flow = AuthFlow::new(&ctx.api, ctx.store.as_ref(), &ctx.messages);
    let mut nav = ChannelNavigator::new(ctx.tx.clone());
    if let Err(err) = flow.logout(&mut nav)
        && let ScreenState::Home(home) = &mut state.screen
    {
        home.error = Some(err.message);
    }
}

fn refresh_categories(state: &mut AppState, ctx: &Ctx) {
    let ScreenState::Home(home) = &mut state.screen else {
        return;
    };
    home.loading = true;
    home.error = None;

    spawn_categories_fetch(state, ctx);
}

fn spawn_categories_fetch(state: &mut AppState, ctx: &Ctx) {
    let request = state.requests.begin();
    let api = ctx.api.clone();
    let store = Arc::clone(&ctx.store);
    let messages = Arc::clone(&ctx.messages);
    let tx = ctx.tx.clone();

    tokio::spawn(async move {
        let token = store.read();
        let result = api
            .categories(token.as_deref())
            .await
            .map_err(|err| user_message(&messages, &err, "categoriesFailed"));
        let _ = tx.send(UiEvent::Categories { request, result });
    });
}

fn submit_login(state: &mut AppState, ctx: &Ctx) {
    let ScreenState::Login(form) = &mut state.screen else {
        return;
    };
    let username = form.value(0).to_string();
    let password = form.value(1).to_string();
    form.submit = SubmitState::Submitting;

    let request = state.requests.begin();
    let api = ctx.api.clone();
    let store = Arc::clone(&ctx.store);
    let messages = Arc::clone(&ctx.messages);
    let tx = ctx.tx.clone();

    tokio::spawn(async move {
        let flow = AuthFlow::new(&api, store.as_ref(), &messages);
        let mut nav = ChannelNavigator::new(tx.clone());
        let result = flow.login(&mut nav, &username, &password).await;
        let _ = tx.send(UiEvent::Flow { request, result });
    });
}

fn submit_signup(state: &mut AppState, ctx: &Ctx) {
    let ScreenState::Signup(form) = &mut state.screen else {
        return;
    };
    let email = form.value(0).to_string();
    let password = form.value(1).to_string();
    let confirm = form.value(2).to_string();
    form.submit = SubmitState::Submitting;

    let request = state.requests.begin();
    let api = ctx.api.clone();
    let store = Arc::clone(&ctx.store);
    let messages = Arc::clone(&ctx.messages);
    let tx = ctx.tx.clone();

    tokio::spawn(async move {
        let flow = AuthFlow::new(&api, store.as_ref(), &messages);
        let mut nav = ChannelNavigator::new(tx.clone());
        let result = flow
            .initial_signup(&mut nav, &email, &password, &confirm)
            .await;
        let _ = tx.send(UiEvent::Flow { request, result });
    });
}

fn submit_profile(state: &mut AppState, ctx: &Ctx) {
    let ScreenState::AdditionalInfo(info) = &mut state.screen else {
        return;
    };
    let user_id = info.user_id.clone();
    let username = info.form.value(0).to_string();
    let phone = info.form.value(1).to_string();
    let city = info.selected_city().to_string();
    let location = info.location;
    info.form.submit = SubmitState::Submitting;

    let request = state.requests.begin();
    let api = ctx.api.clone();
    let store = Arc::clone(&ctx.store);
    let messages = Arc::clone(&ctx.messages);
    let tx = ctx.tx.clone();

    tokio::spawn(async move {
        let flow = AuthFlow::new(&api, store.as_ref(), &messages);
        let mut nav = ChannelNavigator::new(tx.clone());
        let result = flow
            .complete_profile(&mut nav, &user_id, &username, &phone, &city, location)
            .await;
        let _ = tx.send(UiEvent::Flow { request, result });
    });
}

fn submit_reset_request(state: &mut AppState, ctx: &Ctx) {
    let ScreenState::Reset(form) = &mut state.screen else {
        return;
    };
    let email = form.value(0).to_string();
    form.submit = SubmitState::Submitting;

    let request = state.requests.begin();
    let api = ctx.api.clone();
    let store = Arc::clone(&ctx.store);
    let messages = Arc::clone(&ctx.messages);
    let tx = ctx.tx.clone();

    tokio::spawn(async move {
        let flow = AuthFlow::new(&api, store.as_ref(), &messages);
        let mut nav = ChannelNavigator::new(tx.clone());
        let result = flow.request_password_reset(&mut nav, &email).await;
        let _ = tx.send(UiEvent::Flow { request, result });
    });
}

fn submit_reset_confirm(state: &mut AppState, ctx: &Ctx) {
    let ScreenState::ResetOtp { email, form } = &mut state.screen else {
        return;
    };
    let email = email.clone();
    let otp = form.value(0).to_string();
    let new_password = form.value(1).to_string();
    form.submit = SubmitState::Submitting;

    let request = state.requests.begin();
    let api = ctx.api.clone();
    let store = Arc::clone(&ctx.store);
    let messages = Arc::clone(&ctx.messages);
    let tx = ctx.tx.clone();

    tokio::spawn(async move {
        let flow = AuthFlow::new(&api, store.as_ref(), &messages);
        let mut nav = ChannelNavigator::new(tx.clone());
        let result = flow
            .confirm_password_reset(&mut nav, &email, &otp, &new_password)
            .await;
        let _ = tx.send(UiEvent::Flow { request, result });
    });
}
