//! Lua code templates for Neovim buffer operations and host registration.

use crate::constants::{AUGROUP_NAME, COMMAND_NAME, OWNER_VAR, PENDING_VAR, SAVE_HOOK_WAIT_MS};

/// Register the save hooks and the user command.
///
/// Expects the RPC channel id as its only argument. Every loaded buffer gets
/// one buffer-local `BufWritePre` hook. Buffers created later get theirs as
/// soon as they exist, unnamed ones included, so `:enew` then `:w foo.js` is
/// still formatted. The hook notifies the host and waits until
/// the host clears the pending flag, so the write only proceeds once the
/// buffer has been formatted.
pub fn setup_lua() -> String {
    format!(
        r#"
        local chan = ...
        local group = vim.api.nvim_create_augroup('{AUGROUP_NAME}', {{ clear = true }})
        local attached = {{}}
        vim.g.{OWNER_VAR} = chan

        local function attach(buf)
            if attached[buf] or not vim.api.nvim_buf_is_valid(buf) then
                return
            end
            attached[buf] = true
            vim.api.nvim_create_autocmd('BufWritePre', {{
                group = group,
                buffer = buf,
                callback = function(ev)
                    vim.b[ev.buf].{PENDING_VAR} = true
                    if not pcall(vim.rpcnotify, chan, 'will_save', ev.buf) then
                        vim.b[ev.buf].{PENDING_VAR} = nil
                        return
                    end
                    vim.wait({SAVE_HOOK_WAIT_MS}, function()
                        return not vim.b[ev.buf].{PENDING_VAR}
                    end, 5)
                    vim.b[ev.buf].{PENDING_VAR} = nil
                end,
            }})
        end

        for _, buf in ipairs(vim.api.nvim_list_bufs()) do
            if vim.api.nvim_buf_is_loaded(buf) then
                attach(buf)
            end
        end

        vim.api.nvim_create_autocmd({{ 'BufNew', 'BufAdd', 'BufReadPost', 'BufNewFile' }}, {{
            group = group,
            callback = function(ev) attach(ev.buf) end,
        }})

        vim.api.nvim_create_autocmd('BufWipeout', {{
            group = group,
            callback = function(ev) attached[ev.buf] = nil end,
        }})

        vim.api.nvim_create_autocmd('VimLeavePre', {{
            group = group,
            callback = function() vim.rpcnotify(chan, 'detach') end,
        }})

        vim.api.nvim_create_user_command('{COMMAND_NAME}', function(opts)
            vim.rpcnotify(chan, 'format', opts.range, opts.line1, opts.line2)
        end, {{ range = true, desc = 'Format with standard' }})
        "#
    )
}

/// Release every registration made by [`setup_lua`].
///
/// Expects the channel id the registrations were made for. Registrations
/// that a newer host has since taken over are left alone.
pub fn teardown_lua() -> String {
    format!(
        r#"
        local chan = ...
        if vim.g.{OWNER_VAR} ~= chan then
            return false
        end
        pcall(vim.api.nvim_del_augroup_by_name, '{AUGROUP_NAME}')
        pcall(vim.api.nvim_del_user_command, '{COMMAND_NAME}')
        vim.g.{OWNER_VAR} = nil
        return true
        "#
    )
}

/// Let a waiting save hook proceed; takes the buffer number
pub fn release_save_lua() -> String {
    format!(
        r#"
        local buf = ...
        if vim.api.nvim_buf_is_valid(buf) then
            vim.b[buf].{PENDING_VAR} = false
        end
        "#
    )
}

/// Text of a range; takes buffer, start row/col, end row/col (0-based, end exclusive)
pub const GET_TEXT_LUA: &str = r#"
    local buf, sr, sc, er, ec = ...
    return table.concat(vim.api.nvim_buf_get_text(buf, sr, sc, er, ec, {}), '\n')
"#;

/// Replace a range; takes buffer, start row/col, end row/col and the new text
pub const SET_TEXT_LUA: &str = r#"
    local buf, sr, sc, er, ec, text = ...
    vim.api.nvim_buf_set_text(buf, sr, sc, er, ec, vim.split(text, '\n', { plain = true }))
"#;
