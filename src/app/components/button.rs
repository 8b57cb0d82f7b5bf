use dioxus::prelude::*;

#[derive(Clone, Copy, PartialEq)]
pub enum ButtonVariant {
    Primary,
    Secondary,
    Danger,
}

impl ButtonVariant {
    fn class(&self) -> &'static str {
        match self {
            ButtonVariant::Primary => "c-button--primary",
            ButtonVariant::Secondary => "c-button--secondary",
            ButtonVariant::Danger => "c-button--danger",
        }
    }
}

/// `busy` disables the button and swaps its label for an ellipsis
#[component]
pub fn Button(
    #[props(default = ButtonVariant::Primary)] variant: ButtonVariant,
    #[props(default)] disabled: bool,
    #[props(default)] busy: bool,
    onclick: Option<EventHandler<MouseEvent>>,
    children: Element,
) -> Element {
    let variant_class = variant.class();

    rsx! {
        button {
            class: "c-button {variant_class}",
            disabled: disabled || busy,
            onclick: move |evt| {
                if let Some(handler) = &onclick {
                    handler.call(evt);
                }
            },
            if busy { "…" } else { {children} }
        }
    }
}
