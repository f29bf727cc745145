//! Usage text shown when the positional arguments are wrong

use crate::domain::model::Action;

/// Footer for `--help`
pub const ACTIONS_HINT: &str = "Run without arguments to list the available actions.";

/// Full usage block with the action table
pub fn usage_text() -> String {
    let mut text = String::from("Usage: ffverb [OPTIONS] <action> <param> <file>\n\nActions:\n");

    for action in Action::ALL {
        text.push_str(&format!(
            "  {:<8} {:<18} {}\n",
            action.as_str(),
            action.param_hint(),
            action.summary()
        ));
    }

    text.push_str(
        "\nExamples:\n\
         \x20 ffverb clip 00:01:23-00:02:45 talk.mp4\n\
         \x20 ffverb crop 100:50-1280:720 screen.mkv\n\
         \x20 ffverb speed 2 lecture.mp4\n\
         \nOptions go before the action; see ffverb --help.\n",
    );

    text
}
