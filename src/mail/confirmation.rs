//! Confirmation email sent after a successful inquiry submission.
//!
//! The document is a fixed-language (Hindi) HTML email rendered with maud.
//! `send_confirmation` never propagates an error past its own boundary:
//! every failure is logged and folded into [`ConfirmationOutcome::Failed`],
//! so the intake handler can fire it without special exception handling.

use chrono::{Datelike, Utc};
use maud::{DOCTYPE, Markup, html};

use super::{Mailer, OutboundEmail, SendReceipt};

const SENDER: &str = "Apna Project <team@contact.apnaprojectpatna.com>";
const REPLY_TO: &str = "team@contact.apnaprojectpatna.com";
const SUBJECT: &str = "धन्यवाद! आपके विवरण प्राप्त हो गए हैं।";
const WHATSAPP_LINK: &str = "https://chat.whatsapp.com/KN5Pnx7GMuK917QPvS90Uk?mode=hqrt3";
const DEFAULT_PROJECT: &str = "Apna Project";

#[derive(Debug)]
pub enum ConfirmationOutcome {
    Sent(SendReceipt),
    Failed(String),
}

/// Renders and dispatches the confirmation email for a submitted inquiry.
pub async fn send_confirmation(
    mailer: &dyn Mailer,
    full_name: &str,
    email: &str,
    source: Option<&str>,
) -> ConfirmationOutcome {
    let first_name = first_name(full_name);
    let project_name = source.filter(|s| !s.is_empty()).unwrap_or(DEFAULT_PROJECT);

    let message = OutboundEmail {
        from: SENDER.to_string(),
        to: email.to_string(),
        reply_to: REPLY_TO.to_string(),
        subject: SUBJECT.to_string(),
        html: confirmation_html(first_name, project_name).into_string(),
    };

    match mailer.send(&message).await {
        Ok(receipt) => {
            tracing::info!("Confirmation email sent to {email} (id {})", receipt.id);
            ConfirmationOutcome::Sent(receipt)
        }
        Err(e) => {
            tracing::warn!("Failed to send confirmation email to {email}: {e}");
            ConfirmationOutcome::Failed(e.to_string())
        }
    }
}

/// Display name: leading whitespace-separated token of the full name.
fn first_name(full_name: &str) -> &str {
    full_name.split_whitespace().next().unwrap_or(full_name)
}

fn confirmation_html(first_name: &str, project_name: &str) -> Markup {
    let year = Utc::now().year();

    html! {
        (DOCTYPE)
        html lang="hi" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { "धन्यवाद - Apna Project" }
            }
            body style="margin: 0; padding: 0; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f4f4f4;" {
                table role="presentation" width="100%" cellspacing="0" cellpadding="0" border="0" style="background-color: #f4f4f4; padding: 20px 0;" {
                    tr {
                        td align="center" {
                            table role="presentation" width="600" cellspacing="0" cellpadding="0" border="0" style="background-color: #ffffff; border-radius: 12px; overflow: hidden; box-shadow: 0 4px 20px rgba(0, 0, 0, 0.1);" {
                                // Header
                                tr {
                                    td style="background: linear-gradient(135deg, #1e3a5f 0%, #2d5a87 100%); padding: 40px 30px; text-align: center;" {
                                        h1 style="color: #ffffff; margin: 0; font-size: 28px; font-weight: 700; letter-spacing: 1px;" {
                                            "🏠 Apna Project"
                                        }
                                        p style="color: #b8d4e8; margin: 10px 0 0 0; font-size: 14px;" {
                                            "Your Dream Home Awaits"
                                        }
                                    }
                                }
                                // Success indicator
                                tr {
                                    td style="padding: 40px 30px 20px 30px; text-align: center;" {
                                        table role="presentation" cellspacing="0" cellpadding="0" border="0" style="margin: 0 auto;" {
                                            tr {
                                                td style="width: 80px; height: 80px; background: linear-gradient(135deg, #10b981 0%, #059669 100%); border-radius: 50%; text-align: center; vertical-align: middle;" {
                                                    span style="font-size: 40px; color: #ffffff;" { "✓" }
                                                }
                                            }
                                        }
                                    }
                                }
                                // Greeting
                                tr {
                                    td style="padding: 0 40px 30px 40px; text-align: center;" {
                                        h2 style="color: #1e3a5f; margin: 0 0 20px 0; font-size: 24px; font-weight: 600;" {
                                            "नमस्ते " (first_name) " जी! 🙏"
                                        }
                                        p style="color: #4a5568; margin: 0 0 15px 0; font-size: 16px; line-height: 1.8;" {
                                            strong { (project_name) }
                                            " में आपकी रुचि के लिए धन्यवाद!"
                                        }
                                        p style="color: #4a5568; margin: 0 0 15px 0; font-size: 16px; line-height: 1.8;" {
                                            "आपके द्वारा भरी गई जानकारी हमें मिल गई है।"
                                        }
                                        p style="color: #4a5568; margin: 0; font-size: 16px; line-height: 1.8;" {
                                            "हमारी टीम " strong { "जल्द ही आपसे संपर्क करेगी" } "।"
                                        }
                                    }
                                }
                                // Divider
                                tr {
                                    td style="padding: 0 40px;" {
                                        hr style="border: none; border-top: 1px solid #e2e8f0; margin: 0;";
                                    }
                                }
                                // WhatsApp CTA
                                tr {
                                    td style="padding: 30px 40px; text-align: center;" {
                                        p style="color: #4a5568; margin: 0 0 20px 0; font-size: 15px;" {
                                            "📱 तुरंत अपडेट पाने के लिए हमारे WhatsApp ग्रुप से जुड़ें:"
                                        }
                                        a href=(WHATSAPP_LINK) target="_blank" style="display: inline-block; background: linear-gradient(135deg, #25d366 0%, #128c7e 100%); color: #ffffff; text-decoration: none; padding: 16px 40px; border-radius: 50px; font-size: 16px; font-weight: 600; box-shadow: 0 4px 15px rgba(37, 211, 102, 0.4);" {
                                            span style="vertical-align: middle;" { "💬 WhatsApp ग्रुप जॉइन करें" }
                                        }
                                    }
                                }
                                // Feature showcase
                                tr {
                                    td style="padding: 20px 40px 30px 40px; background-color: #f8fafc;" {
                                        h3 style="color: #1e3a5f; margin: 0 0 20px 0; font-size: 18px; text-align: center;" {
                                            "✨ हमारे साथ क्यों जुड़ें?"
                                        }
                                        table role="presentation" width="100%" cellspacing="0" cellpadding="0" border="0" {
                                            tr {
                                                td width="33%" style="text-align: center; padding: 10px;" {
                                                    div style="font-size: 30px; margin-bottom: 8px;" { "🏆" }
                                                    p style="color: #4a5568; margin: 0; font-size: 13px;" { "विश्वसनीय बिल्डर" }
                                                }
                                                td width="33%" style="text-align: center; padding: 10px;" {
                                                    div style="font-size: 30px; margin-bottom: 8px;" { "💰" }
                                                    p style="color: #4a5568; margin: 0; font-size: 13px;" { "बेस्ट प्राइस" }
                                                }
                                                td width="33%" style="text-align: center; padding: 10px;" {
                                                    div style="font-size: 30px; margin-bottom: 8px;" { "🎯" }
                                                    p style="color: #4a5568; margin: 0; font-size: 13px;" { "प्राइम लोकेशन" }
                                                }
                                            }
                                        }
                                    }
                                }
                                // Footer
                                tr {
                                    td style="background-color: #1e3a5f; padding: 30px 40px; text-align: center;" {
                                        p style="color: #b8d4e8; margin: 0 0 10px 0; font-size: 14px;" {
                                            "धन्यवाद," br;
                                            strong style="color: #ffffff; font-size: 16px;" { "Team Apna Project" }
                                        }
                                        p style="color: #7a9bb8; margin: 15px 0 0 0; font-size: 12px;" {
                                            "📍 Patna, Bihar | 📞 Contact us for more details"
                                        }
                                        p style="color: #5a7a98; margin: 15px 0 0 0; font-size: 11px;" {
                                            "© " (year) " Apna Project. All rights reserved."
                                        }
                                    }
                                }
                            }
                            // Unsubscribe footer
                            table role="presentation" width="600" cellspacing="0" cellpadding="0" border="0" {
                                tr {
                                    td style="padding: 20px; text-align: center;" {
                                        p style="color: #9ca3af; margin: 0; font-size: 11px;" {
                                            "यह ईमेल आपको भेजा गया है क्योंकि आपने हमारी वेबसाइट पर अपनी जानकारी सबमिट की है।"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
