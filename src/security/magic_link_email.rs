use crate::api::Email;
use url::Url;

/// The email delivering a freshly issued magic link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicLinkEmailTemplate<'a> {
    pub link: &'a Url,
}

impl MagicLinkEmailTemplate<'_> {
    /// Compiles the magic link template as an email.
    pub fn compile_to_email(&self) -> Email {
        let link = self.link.as_str();
        Email::html(
            "Log in to Platter",
            format!("To finish logging in to Platter, please follow this link: {link}"),
            format!(
                r#"
<!DOCTYPE html>
<html>
  <head>
    <title>Log in to Platter</title>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
      body {{
        font-family: Arial, sans-serif;
        background-color: #f1f1f1;
        margin: 0;
        padding: 0;
      }}
      .container {{
        max-width: 600px;
        margin: 0 auto;
        background-color: #fff;
        padding: 20px;
        border-radius: 5px;
        box-shadow: 0 0 10px rgba(0, 0, 0, 0.1);
      }}
      h1 {{
        font-size: 24px;
        margin-top: 0;
      }}
      p {{
        font-size: 16px;
        line-height: 1.5;
        margin-bottom: 20px;
      }}
      .login-link {{
        color: #fff;
        background-color: #2196F3;
        padding: 10px 20px;
        text-decoration: none;
        border-radius: 5px;
      }}
    </style>
  </head>
  <body>
    <div class="container">
      <h1>Log in to Platter</h1>
      <p>Hey there! Click the link below to finish logging in to Platter:</p>
      <a class="login-link" href="{link}">Log in</a>
      <p>If the button above doesn't work, you can also copy and paste the following URL into your browser:</p>
      <p>{link}</p>
      <p>If you didn't request this email, you can safely ignore it.</p>
    </div>
  </body>
</html>"#
            ),
        )
    }
}
